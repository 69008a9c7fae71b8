//! # Cart Store
//!
//! The observable, session-scoped cart state container.
//!
//! ## Thread Safety
//! The cart is wrapped in a `Mutex` because:
//! 1. Multiple UI handles may share the store via `Arc`
//! 2. Only one caller should modify the cart at a time
//! 3. Every operation is synchronous and releases the lock before returning
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Data Flow                                 │
//! │                                                                         │
//! │  UI event            Store operation          Notification              │
//! │  ────────            ───────────────          ────────────              │
//! │                                                                         │
//! │  "Add to Cart" ────► add_to_cart() ─────┐                               │
//! │  qty stepper ──────► update_quantity() ─┤                               │
//! │  trash icon ───────► remove_from_cart() ┼──► CartSnapshot ──► every     │
//! │  "Clear Cart" ─────► clear_cart() ──────┤    (items+totals)  subscriber │
//! │  promo form ───────► apply_promo() ─────┘                               │
//! │                                                                         │
//! │  Subscribers (cart badge, cart page, drawer) re-render from the         │
//! │  snapshot; none of them may mutate the store from inside a callback.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Single-Writer Discipline
//! The item sequence is never handed out mutably. All mutation funnels
//! through the named operations below; reads get clones or go through
//! [`CartStore::with_cart`]. This is the one enforced discipline in the
//! whole system.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use harvest_core::cart::{Cart, CartLineItem};
use harvest_core::checkout::{is_valid_promo, OrderSummary};
use harvest_core::error::CoreResult;
use harvest_core::money::Money;
use harvest_core::types::Product;

// =============================================================================
// Totals & Snapshot
// =============================================================================

/// Derived cart totals, recomputed for every snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Number of unique lines.
    pub unique_items: usize,
    /// Sum of quantities across all lines.
    pub total_items: i64,
    /// Σ price × quantity, full precision.
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            unique_items: cart.unique_items(),
            total_items: cart.total_items(),
            subtotal: cart.total_price(),
        }
    }
}

/// The immutable state handed to subscribers on every change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
    pub promo_applied: bool,
}

// =============================================================================
// Subscriptions
// =============================================================================

/// Handle returned by [`CartStore::subscribe`]; pass it back to
/// [`CartStore::unsubscribe`] to stop receiving notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Listener = Box<dyn Fn(&CartSnapshot) + Send + Sync>;

// =============================================================================
// Cart Store
// =============================================================================

/// Session state behind the store's mutex: the cart plus the promo flag.
///
/// One lock for both because the promo's lifecycle is tied to the cart:
/// clearing the cart resets the promo in the same critical section.
#[derive(Debug, Default)]
struct Session {
    cart: Cart,
    promo_applied: bool,
}

/// The authoritative cart store for one browser-session equivalent.
///
/// Constructor-injected: the application root owns it (typically in an
/// `Arc`) and passes handles to consumers. There is no global singleton.
///
/// All operations are synchronous; read-after-write within the same call
/// chain is always consistent. Subscriber notification is synchronous
/// fan-out after the state lock is released, so listeners may read the
/// store but must not mutate it or (un)subscribe from inside a callback.
pub struct CartStore {
    session: Mutex<Session>,
    subscribers: Mutex<Vec<(SubscriberId, Listener)>>,
    next_subscriber: AtomicU64,
}

impl CartStore {
    /// Creates a new store with an empty cart and no promo applied.
    pub fn new() -> Self {
        CartStore {
            session: Mutex::new(Session::default()),
            subscribers: Mutex::new(Vec::new()),
            next_subscriber: AtomicU64::new(1),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product to the cart (merging quantities for an existing id)
    /// and notifies subscribers.
    ///
    /// ## Errors
    /// Non-positive `quantity` is rejected; no notification fires and the
    /// cart is unchanged.
    pub fn add_to_cart(&self, product: &Product, quantity: i64) -> CoreResult<()> {
        debug!(product_id = %product.id, quantity, "add_to_cart");

        let snapshot = {
            let mut session = self.lock_session();
            session.cart.add_item(product, quantity)?;
            Self::snapshot_of(&session)
        };
        self.notify(&snapshot);
        Ok(())
    }

    /// Sets a line's quantity; non-positive values remove the line.
    /// Unknown ids are silent no-ops (subscribers are still notified).
    pub fn update_quantity(&self, id: &str, quantity: i64) {
        debug!(product_id = %id, quantity, "update_quantity");

        let snapshot = {
            let mut session = self.lock_session();
            session.cart.update_quantity(id, quantity);
            Self::snapshot_of(&session)
        };
        self.notify(&snapshot);
    }

    /// Increases a line's quantity by one, subject to the stock gate.
    pub fn increment(&self, id: &str) -> CoreResult<()> {
        debug!(product_id = %id, "increment");

        let snapshot = {
            let mut session = self.lock_session();
            session.cart.increment(id)?;
            Self::snapshot_of(&session)
        };
        self.notify(&snapshot);
        Ok(())
    }

    /// Decreases a line's quantity by one, flooring at 1.
    pub fn decrement(&self, id: &str) {
        debug!(product_id = %id, "decrement");

        let snapshot = {
            let mut session = self.lock_session();
            session.cart.decrement(id);
            Self::snapshot_of(&session)
        };
        self.notify(&snapshot);
    }

    /// Removes a line if present; idempotent.
    pub fn remove_from_cart(&self, id: &str) {
        debug!(product_id = %id, "remove_from_cart");

        let snapshot = {
            let mut session = self.lock_session();
            session.cart.remove_item(id);
            Self::snapshot_of(&session)
        };
        self.notify(&snapshot);
    }

    /// Empties the cart and resets the session promo.
    ///
    /// The promo's lifetime is cart-level state: once the cart is gone,
    /// a new order starts without a discount.
    pub fn clear_cart(&self) {
        debug!("clear_cart");

        let snapshot = {
            let mut session = self.lock_session();
            session.cart.clear();
            session.promo_applied = false;
            Self::snapshot_of(&session)
        };
        self.notify(&snapshot);
    }

    /// Applies a promo code for the rest of the session.
    ///
    /// Returns whether the code was accepted. Invalid codes are silently
    /// ignored; `false` here is indistinguishable from "not yet entered",
    /// matching the storefront behavior. Once applied, the promo stays
    /// applied until the cart is cleared; re-applying is a no-op.
    pub fn apply_promo(&self, code: &str) -> bool {
        let accepted = is_valid_promo(code);
        debug!(accepted, "apply_promo");

        if !accepted {
            return false;
        }

        let snapshot = {
            let mut session = self.lock_session();
            session.promo_applied = true;
            Self::snapshot_of(&session)
        };
        self.notify(&snapshot);
        true
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Sum of quantities across all lines. Pure function of current state.
    pub fn total_items(&self) -> i64 {
        self.lock_session().cart.total_items()
    }

    /// Σ price × quantity in one pass, full precision.
    pub fn total_price(&self) -> Money {
        self.lock_session().cart.total_price()
    }

    /// True iff a line with that id exists.
    pub fn is_in_cart(&self, id: &str) -> bool {
        self.lock_session().cart.contains(id)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lock_session().cart.is_empty()
    }

    /// Whether the session promo is currently applied.
    pub fn is_promo_applied(&self) -> bool {
        self.lock_session().promo_applied
    }

    /// Read-only clone of the current line items, in insertion order.
    pub fn items(&self) -> Vec<CartLineItem> {
        self.lock_session().cart.items().to_vec()
    }

    /// A full snapshot: items, totals, promo flag.
    pub fn snapshot(&self) -> CartSnapshot {
        Self::snapshot_of(&self.lock_session())
    }

    /// Derives the order summary from the current subtotal and promo state.
    pub fn order_summary(&self) -> OrderSummary {
        let session = self.lock_session();
        OrderSummary::compute(session.cart.total_price(), session.promo_applied)
    }

    /// Executes a closure with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// # use harvest_cart::store::CartStore;
    /// let store = CartStore::new();
    /// let n = store.with_cart(|cart| cart.unique_items());
    /// assert_eq!(n, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.lock_session().cart)
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Registers a listener called with a fresh snapshot after every state
    /// change. Returns a handle for [`CartStore::unsubscribe`].
    ///
    /// Delivery order between subscribers is unspecified.
    pub fn subscribe<F>(&self, listener: F) -> SubscriberId
    where
        F: Fn(&CartSnapshot) + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_subscriber.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .lock()
            .expect("subscriber list poisoned")
            .push((id, Box::new(listener)));
        debug!(subscriber = id.0, "subscribe");
        id
    }

    /// Removes a listener. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.subscribers.lock().expect("subscriber list poisoned");
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        before != subscribers.len()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock_session(&self) -> std::sync::MutexGuard<'_, Session> {
        self.session.lock().expect("cart session poisoned")
    }

    fn snapshot_of(session: &Session) -> CartSnapshot {
        CartSnapshot {
            items: session.cart.items().to_vec(),
            totals: CartTotals::from(&session.cart),
            promo_applied: session.promo_applied,
        }
    }

    /// Synchronous fan-out. The session lock is already released here, so
    /// listeners may freely read the store.
    fn notify(&self, snapshot: &CartSnapshot) {
        let subscribers = self.subscribers.lock().expect("subscriber list poisoned");
        for (_, listener) in subscribers.iter() {
            listener(snapshot);
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.lock_session();
        f.debug_struct("CartStore")
            .field("items", &session.cart.unique_items())
            .field("promo_applied", &session.promo_applied)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    fn test_product(id: &str, major: i64, minor: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            price: Money::from_major_minor(major, minor),
            image: String::new(),
            category: "fruits".to_string(),
            in_stock: true,
        }
    }

    #[test]
    fn test_add_and_query() {
        let store = CartStore::new();
        store.add_to_cart(&test_product("p1", 4, 99), 2).unwrap();

        assert_eq!(store.total_items(), 2);
        assert_eq!(store.total_price(), Money::from_major_minor(9, 98));
        assert!(store.is_in_cart("p1"));
        assert!(!store.is_in_cart("p2"));
    }

    #[test]
    fn test_subscribers_notified_on_every_mutation() {
        let store = CartStore::new();
        let notifications = Arc::new(AtomicUsize::new(0));

        let seen = Arc::clone(&notifications);
        store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.add_to_cart(&test_product("p1", 4, 99), 1).unwrap(); // 1
        store.update_quantity("p1", 3); // 2
        store.increment("p1").unwrap(); // 3
        store.decrement("p1"); // 4
        store.remove_from_cart("p1"); // 5
        store.clear_cart(); // 6

        assert_eq!(notifications.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_snapshot_contents() {
        let store = CartStore::new();
        let last_total = Arc::new(Mutex::new(Money::zero()));

        let seen = Arc::clone(&last_total);
        store.subscribe(move |snapshot| {
            *seen.lock().unwrap() = snapshot.totals.subtotal;
        });

        store.add_to_cart(&test_product("p1", 10, 0), 2).unwrap();
        assert_eq!(*last_total.lock().unwrap(), Money::from_major_minor(20, 0));
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let store = CartStore::new();
        store.add_to_cart(&test_product("p1", 4, 99), 2).unwrap();

        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(json["totals"]["totalItems"], serde_json::json!(2));
        assert_eq!(json["totals"]["uniqueItems"], serde_json::json!(1));
        assert_eq!(json["promoApplied"], serde_json::json!(false));
    }

    #[test]
    fn test_rejected_add_does_not_notify() {
        let store = CartStore::new();
        let notifications = Arc::new(AtomicUsize::new(0));

        let seen = Arc::clone(&notifications);
        store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert!(store.add_to_cart(&test_product("p1", 4, 99), 0).is_err());
        assert_eq!(notifications.load(Ordering::SeqCst), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let store = CartStore::new();
        let notifications = Arc::new(AtomicUsize::new(0));

        let seen = Arc::clone(&notifications);
        let id = store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.add_to_cart(&test_product("p1", 4, 99), 1).unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id)); // second time: already gone

        store.clear_cart();
        assert_eq!(notifications.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_promo_lifecycle() {
        let store = CartStore::new();
        store.add_to_cart(&test_product("p1", 45, 0), 1).unwrap();

        assert!(!store.is_promo_applied());
        assert!(!store.apply_promo("wrong-code")); // silently ignored
        assert!(!store.is_promo_applied());

        assert!(store.apply_promo("FRESH10")); // case-insensitive
        assert!(store.is_promo_applied());

        // Stays applied across ordinary mutations...
        store.update_quantity("p1", 2);
        assert!(store.is_promo_applied());

        // ...and resets when cart-level state resets.
        store.clear_cart();
        assert!(!store.is_promo_applied());
    }

    #[test]
    fn test_order_summary_worked_example() {
        let store = CartStore::new();
        store.add_to_cart(&test_product("p1", 15, 0), 3).unwrap(); // $45.00
        store.apply_promo("fresh10");

        let summary = store.order_summary();
        assert_eq!(summary.subtotal, Money::from_major_minor(45, 0));
        assert_eq!(summary.shipping, Money::from_major_minor(5, 99));
        assert_eq!(summary.discount, Money::from_major_minor(4, 50));
        assert_eq!(summary.tax, Money::from_major_minor(3, 24));
        assert_eq!(summary.total, Money::from_major_minor(49, 73));
    }

    #[test]
    fn test_listener_may_read_store() {
        // The session lock is released before fan-out, so reading back
        // from inside a callback must not deadlock.
        let store = Arc::new(CartStore::new());
        let observed = Arc::new(AtomicUsize::new(0));

        let handle = Arc::clone(&store);
        let seen = Arc::clone(&observed);
        store.subscribe(move |_| {
            seen.store(handle.total_items() as usize, Ordering::SeqCst);
        });

        store.add_to_cart(&test_product("p1", 4, 99), 5).unwrap();
        assert_eq!(observed.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_shared_across_threads() {
        let store = Arc::new(CartStore::new());
        let mut handles = Vec::new();

        for n in 0..4 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                let product = test_product(&format!("p{n}"), 1, 0);
                for _ in 0..50 {
                    store.add_to_cart(&product, 1).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.total_items(), 200);
        assert_eq!(store.with_cart(|c| c.unique_items()), 4);
    }
}
