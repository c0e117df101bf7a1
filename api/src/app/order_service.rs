//! Order service
//!
//! Places orders against the product, user and order repositories.
//!
//! Placement runs a read-only pre-pass (user lookup, product lookups, stock
//! checks) before any write, so a rejected order leaves every store untouched.
//! A single placement lock serializes concurrent placements from the pre-pass
//! through the final write: two orders can never both be approved against the
//! same stock reading. Product management does not take this lock.
//!
//! There is no compensating rollback. If recording the order fails after stock
//! has been decremented, the decrement stays and the failure surfaces as
//! `Internal`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::entities::{NewOrder, Order, OrderId, Product, ProductId};
use crate::domain::ports::{OrderRepository, ProductRepository, UserRepository};
use crate::error::{AppError, DomainError};

/// Service for placing and querying orders
pub struct OrderService<OR, UR, PR>
where
    OR: OrderRepository,
    UR: UserRepository,
    PR: ProductRepository,
{
    orders: Arc<OR>,
    users: Arc<UR>,
    products: Arc<PR>,
    placement_lock: Mutex<()>,
}

/// Stock reserved for one product during the pre-pass
struct Reservation {
    product: Product,
    quantity: i64,
}

impl<OR, UR, PR> OrderService<OR, UR, PR>
where
    OR: OrderRepository,
    UR: UserRepository,
    PR: ProductRepository,
{
    pub fn new(orders: Arc<OR>, users: Arc<UR>, products: Arc<PR>) -> Self {
        Self {
            orders,
            users,
            products,
            placement_lock: Mutex::new(()),
        }
    }

    /// Place an order
    ///
    /// 1. Validate the order shape
    /// 2. Confirm the user exists
    /// 3. Look up every product in caller order and check stock
    /// 4. Decrement stock and persist each product
    /// 5. Stamp and record the order
    ///
    /// Steps 1-3 fail without side effects and report the first offending
    /// item. Items naming the same product more than once draw on one shared
    /// stock count.
    pub async fn place_order(&self, new_order: NewOrder) -> Result<Order, AppError> {
        new_order.validate()?;

        let _placement = self.placement_lock.lock().await;

        self.users.get_by_id(&new_order.user_id).await?;

        let (reservations, total) = self.reserve_stock(&new_order).await?;

        for reservation in reservations {
            let mut product = reservation.product;
            product.stock -= reservation.quantity;
            if let Err(e) = self.products.update(&product).await {
                tracing::error!(
                    "Stock update for product {} failed mid-placement; earlier decrements remain: {}",
                    product.id,
                    e
                );
                return Err(AppError::Domain(DomainError::Internal(format!(
                    "failed to update stock for product {}: {}",
                    product.id, e
                ))));
            }
        }

        let order = new_order.place(total);
        if let Err(e) = self.orders.create(&order).await {
            tracing::error!(
                "Failed to record order {} after stock was decremented: {}",
                order.id,
                e
            );
            return Err(AppError::Domain(DomainError::Internal(format!(
                "failed to record order: {}",
                e
            ))));
        }

        tracing::info!(
            order_id = %order.id,
            user_id = %order.user_id,
            items = order.items.len(),
            total = order.total,
            "Order placed"
        );

        Ok(order)
    }

    /// Read-only pre-pass: resolve products and check cumulative demand.
    ///
    /// Returns reservations in first-seen product order together with the
    /// order total priced at the values just read.
    async fn reserve_stock(
        &self,
        new_order: &NewOrder,
    ) -> Result<(Vec<Reservation>, f64), AppError> {
        let mut reservations: Vec<Reservation> = Vec::new();
        let mut index: HashMap<ProductId, usize> = HashMap::new();
        let mut total = 0.0;

        for item in &new_order.items {
            let slot = match index.get(&item.product_id).copied() {
                Some(slot) => slot,
                None => {
                    let product = self.products.get_by_id(&item.product_id).await?;
                    reservations.push(Reservation {
                        product,
                        quantity: 0,
                    });
                    index.insert(item.product_id.clone(), reservations.len() - 1);
                    reservations.len() - 1
                }
            };

            let reservation = &mut reservations[slot];
            let demand = reservation.quantity.checked_add(item.quantity);
            let Some(demand) = demand.filter(|d| reservation.product.has_stock_for(*d)) else {
                tracing::debug!(
                    "Rejecting order for user {}: product {} has {} in stock, {} more requested",
                    new_order.user_id,
                    reservation.product.id,
                    reservation.product.stock,
                    item.quantity
                );
                return Err(AppError::Domain(DomainError::Validation(format!(
                    "insufficient stock for product {}",
                    reservation.product.id
                ))));
            };

            reservation.quantity = demand;
            total += reservation.product.price * item.quantity as f64;
            if !total.is_finite() {
                return Err(AppError::Domain(DomainError::Validation(format!(
                    "order total out of range at product {}",
                    reservation.product.id
                ))));
            }
        }

        Ok((reservations, total))
    }

    /// Get an order by ID
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, AppError> {
        Ok(self.orders.get_by_id(id).await?)
    }

    /// List all orders
    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.orders.list().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryOrderRepository, InMemoryProductRepository, InMemoryUserRepository};
    use crate::domain::entities::{OrderItem, UserId};
    use crate::test_utils::{
        test_product, test_user, FailingOrderRepository, FailingUpdateProductRepository,
    };

    type TestOrderService =
        OrderService<InMemoryOrderRepository, InMemoryUserRepository, InMemoryProductRepository>;

    struct Harness {
        service: Arc<TestOrderService>,
        products: Arc<InMemoryProductRepository>,
        orders: Arc<InMemoryOrderRepository>,
        user_id: UserId,
    }

    async fn harness(products: &[Product]) -> Harness {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = test_user("buyer@example.com");
        users.create(&user).await.unwrap();

        let product_repo = Arc::new(InMemoryProductRepository::new());
        for product in products {
            product_repo.create(product).await.unwrap();
        }

        let orders = Arc::new(InMemoryOrderRepository::new());
        let service = Arc::new(OrderService::new(
            orders.clone(),
            users,
            product_repo.clone(),
        ));

        Harness {
            service,
            products: product_repo,
            orders,
            user_id: user.id,
        }
    }

    async fn stock_of(products: &InMemoryProductRepository, id: &ProductId) -> i64 {
        products.get_by_id(id).await.unwrap().stock
    }

    fn domain_err(result: Result<Order, AppError>) -> DomainError {
        match result {
            Err(AppError::Domain(e)) => e,
            other => panic!("expected domain error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn place_order_decrements_stock_and_totals() {
        let product = test_product(10.0, 5);
        let h = harness(&[product.clone()]).await;

        let order = h
            .service
            .place_order(NewOrder::new(
                h.user_id.clone(),
                vec![OrderItem::new(product.id.clone(), 3)],
            ))
            .await
            .unwrap();

        assert_eq!(order.total, 30.0);
        assert_eq!(order.user_id, h.user_id);
        assert_eq!(stock_of(&h.products, &product.id).await, 2);
        assert_eq!(h.service.get_order(&order.id).await.unwrap(), order);
    }

    #[tokio::test]
    async fn second_order_exceeding_remaining_stock_is_rejected() {
        let product = test_product(10.0, 5);
        let h = harness(&[product.clone()]).await;
        let items = vec![OrderItem::new(product.id.clone(), 3)];

        h.service
            .place_order(NewOrder::new(h.user_id.clone(), items.clone()))
            .await
            .unwrap();
        let result = h
            .service
            .place_order(NewOrder::new(h.user_id.clone(), items))
            .await;

        let err = domain_err(result);
        assert!(matches!(err, DomainError::Validation(ref msg) if msg.contains("insufficient stock")));
        assert_eq!(stock_of(&h.products, &product.id).await, 2);
        assert_eq!(h.service.list_orders().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn multi_item_total_sums_every_line() {
        let a = test_product(2.5, 10);
        let b = test_product(4.0, 10);
        let h = harness(&[a.clone(), b.clone()]).await;

        let order = h
            .service
            .place_order(NewOrder::new(
                h.user_id.clone(),
                vec![OrderItem::new(a.id.clone(), 2), OrderItem::new(b.id.clone(), 3)],
            ))
            .await
            .unwrap();

        assert_eq!(order.total, 17.0);
        assert_eq!(stock_of(&h.products, &a.id).await, 8);
        assert_eq!(stock_of(&h.products, &b.id).await, 7);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found_and_stock_untouched() {
        let product = test_product(10.0, 5);
        let h = harness(&[product.clone()]).await;

        let result = h
            .service
            .place_order(NewOrder::new(
                "no-such-user",
                vec![OrderItem::new(product.id.clone(), 1)],
            ))
            .await;

        assert!(matches!(domain_err(result), DomainError::NotFound(_)));
        assert_eq!(stock_of(&h.products, &product.id).await, 5);
        assert!(h.orders.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_product_is_not_found_and_stock_untouched() {
        let product = test_product(10.0, 5);
        let h = harness(&[product.clone()]).await;

        let result = h
            .service
            .place_order(NewOrder::new(
                h.user_id.clone(),
                vec![
                    OrderItem::new(product.id.clone(), 1),
                    OrderItem::new("missing-product", 1),
                ],
            ))
            .await;

        assert!(matches!(domain_err(result), DomainError::NotFound(_)));
        assert_eq!(stock_of(&h.products, &product.id).await, 5);
    }

    #[tokio::test]
    async fn insufficient_second_item_leaves_first_untouched() {
        let first = test_product(1.0, 10);
        let second = test_product(1.0, 1);
        let h = harness(&[first.clone(), second.clone()]).await;

        let result = h
            .service
            .place_order(NewOrder::new(
                h.user_id.clone(),
                vec![
                    OrderItem::new(first.id.clone(), 4),
                    OrderItem::new(second.id.clone(), 2),
                ],
            ))
            .await;

        let err = domain_err(result);
        assert_eq!(
            err,
            DomainError::Validation(format!("insufficient stock for product {}", second.id))
        );
        assert_eq!(stock_of(&h.products, &first.id).await, 10);
        assert_eq!(stock_of(&h.products, &second.id).await, 1);
        assert!(h.orders.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn first_offending_item_is_reported() {
        let short_a = test_product(1.0, 0);
        let short_b = test_product(1.0, 0);
        let h = harness(&[short_a.clone(), short_b.clone()]).await;

        let result = h
            .service
            .place_order(NewOrder::new(
                h.user_id.clone(),
                vec![
                    OrderItem::new(short_b.id.clone(), 1),
                    OrderItem::new(short_a.id.clone(), 1),
                ],
            ))
            .await;

        assert_eq!(
            domain_err(result),
            DomainError::Validation(format!("insufficient stock for product {}", short_b.id))
        );
    }

    #[tokio::test]
    async fn repeated_product_draws_on_shared_stock() {
        let product = test_product(10.0, 5);
        let h = harness(&[product.clone()]).await;

        let result = h
            .service
            .place_order(NewOrder::new(
                h.user_id.clone(),
                vec![
                    OrderItem::new(product.id.clone(), 3),
                    OrderItem::new(product.id.clone(), 3),
                ],
            ))
            .await;

        assert!(matches!(domain_err(result), DomainError::Validation(_)));
        assert_eq!(stock_of(&h.products, &product.id).await, 5);

        let order = h
            .service
            .place_order(NewOrder::new(
                h.user_id.clone(),
                vec![
                    OrderItem::new(product.id.clone(), 2),
                    OrderItem::new(product.id.clone(), 3),
                ],
            ))
            .await
            .unwrap();
        assert_eq!(order.total, 50.0);
        assert_eq!(order.items.len(), 2);
        assert_eq!(stock_of(&h.products, &product.id).await, 0);
    }

    #[tokio::test]
    async fn malformed_order_is_rejected_before_lookups() {
        let h = harness(&[]).await;

        let empty = h
            .service
            .place_order(NewOrder::new("no-such-user", vec![]))
            .await;
        let zero_qty = h
            .service
            .place_order(NewOrder::new(
                "no-such-user",
                vec![OrderItem::new("missing", 0)],
            ))
            .await;

        // Validation wins over the missing user
        assert!(matches!(domain_err(empty), DomainError::Validation(_)));
        assert!(matches!(domain_err(zero_qty), DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn total_is_fixed_at_placement_price() {
        let mut product = test_product(10.0, 5);
        let h = harness(&[product.clone()]).await;

        let order = h
            .service
            .place_order(NewOrder::new(
                h.user_id.clone(),
                vec![OrderItem::new(product.id.clone(), 1)],
            ))
            .await
            .unwrap();

        product.price = 99.0;
        product.stock = 4;
        h.products.update(&product).await.unwrap();

        assert_eq!(h.service.get_order(&order.id).await.unwrap().total, 10.0);
    }

    #[tokio::test]
    async fn deleting_product_keeps_past_orders() {
        let product = test_product(10.0, 5);
        let h = harness(&[product.clone()]).await;

        let order = h
            .service
            .place_order(NewOrder::new(
                h.user_id.clone(),
                vec![OrderItem::new(product.id.clone(), 1)],
            ))
            .await
            .unwrap();
        h.products.delete(&product.id).await.unwrap();

        let stored = h.service.get_order(&order.id).await.unwrap();
        assert_eq!(stored.items[0].product_id, product.id);
    }

    #[tokio::test]
    async fn get_unknown_order_is_not_found() {
        let h = harness(&[]).await;
        let result = h.service.get_order(&OrderId::from("nope")).await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::NotFound(_)))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_full_stock_orders_admit_exactly_one() {
        let product = test_product(10.0, 5);
        let h = harness(&[product.clone()]).await;

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let service = Arc::clone(&h.service);
                let order = NewOrder::new(
                    h.user_id.clone(),
                    vec![OrderItem::new(product.id.clone(), 5)],
                );
                tokio::spawn(async move { service.place_order(order).await })
            })
            .collect();

        let mut placed = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => placed += 1,
                Err(AppError::Domain(DomainError::Validation(_))) => rejected += 1,
                Err(e) => panic!("unexpected error: {:?}", e),
            }
        }

        assert_eq!((placed, rejected), (1, 1));
        assert_eq!(stock_of(&h.products, &product.id).await, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_orders_never_oversell() {
        let product = test_product(1.0, 20);
        let h = harness(&[product.clone()]).await;

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let service = Arc::clone(&h.service);
                let order = NewOrder::new(
                    h.user_id.clone(),
                    vec![OrderItem::new(product.id.clone(), 1)],
                );
                tokio::spawn(async move { service.place_order(order).await })
            })
            .collect();

        let mut placed = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                placed += 1;
            }
        }

        assert_eq!(placed, 20);
        assert_eq!(stock_of(&h.products, &product.id).await, 0);
        assert_eq!(h.orders.list().await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn failed_order_record_surfaces_internal_and_keeps_decrement() {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = test_user("buyer@example.com");
        users.create(&user).await.unwrap();
        let products = Arc::new(InMemoryProductRepository::new());
        let product = test_product(10.0, 5);
        products.create(&product).await.unwrap();

        let service = OrderService::new(
            Arc::new(FailingOrderRepository),
            users,
            products.clone(),
        );

        let result = service
            .place_order(NewOrder::new(
                user.id.clone(),
                vec![OrderItem::new(product.id.clone(), 2)],
            ))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::Internal(_)))
        ));
        assert_eq!(stock_of(&products, &product.id).await, 3);
    }

    #[tokio::test]
    async fn failed_stock_write_surfaces_internal_and_keeps_earlier_decrements() {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = test_user("buyer@example.com");
        users.create(&user).await.unwrap();
        let first = test_product(10.0, 5);
        let second = test_product(4.0, 5);
        let products = Arc::new(FailingUpdateProductRepository {
            inner: InMemoryProductRepository::new(),
            refuse: second.id.clone(),
        });
        products.create(&first).await.unwrap();
        products.create(&second).await.unwrap();
        let orders = Arc::new(InMemoryOrderRepository::new());

        let service = OrderService::new(orders.clone(), users, products.clone());

        let result = service
            .place_order(NewOrder::new(
                user.id.clone(),
                vec![
                    OrderItem::new(first.id.clone(), 2),
                    OrderItem::new(second.id.clone(), 1),
                ],
            ))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::Internal(_)))
        ));
        assert_eq!(stock_of(&products.inner, &first.id).await, 3);
        assert_eq!(stock_of(&products.inner, &second.id).await, 5);
        assert!(orders.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn repeated_product_with_overflowing_quantity_is_rejected() {
        let product = test_product(10.0, 5);
        let h = harness(&[product.clone()]).await;

        let result = h
            .service
            .place_order(NewOrder::new(
                h.user_id.clone(),
                vec![
                    OrderItem::new(product.id.clone(), 1),
                    OrderItem::new(product.id.clone(), i64::MAX),
                ],
            ))
            .await;

        assert_eq!(
            domain_err(result),
            DomainError::Validation(format!("insufficient stock for product {}", product.id))
        );
        assert_eq!(stock_of(&h.products, &product.id).await, 5);
        assert!(h.orders.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_finite_total_is_rejected() {
        let product = test_product(1e308, 5);
        let h = harness(&[product.clone()]).await;

        let result = h
            .service
            .place_order(NewOrder::new(
                h.user_id.clone(),
                vec![OrderItem::new(product.id.clone(), 2)],
            ))
            .await;

        assert!(matches!(domain_err(result), DomainError::Validation(_)));
        assert_eq!(stock_of(&h.products, &product.id).await, 5);
        assert!(h.orders.list().await.unwrap().is_empty());
    }
}
