//! # Checkout State Machine
//!
//! Payment collection for the sale in progress.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout State Machine                             │
//! │                                                                         │
//! │            open()                begin_submit()                         │
//! │   Idle ────────────► ModalOpen ────────────────► Submitting             │
//! │    ▲   (cart empty:      │    (guards fail:          │                  │
//! │    │    EmptyCart,       │     modal stays open,     │                  │
//! │    │    no change)       │     NO network call)      │                  │
//! │    │                     │                           │                  │
//! │    │      cancel()       │              ┌────────────┴────────────┐     │
//! │    ├─────────────────────┘              ▼                         ▼     │
//! │    │                            Success(sale)              Failure(msg) │
//! │    │       dismiss()                    │                         │     │
//! │    └────────────────────────────────────┴─────────────────────────┘     │
//! │                                                                         │
//! │  Idempotency key lifetime:                                              │
//! │    minted on first begin_submit ── kept through Failure/dismiss/reopen  │
//! │    so a retry of the same attempt reuses it ── rotated (dropped) on     │
//! │    Success and on explicit cancel()                                     │
//! │                                                                         │
//! │  Submitting refuses re-entry: a second confirm while a submission is    │
//! │  outstanding gets CheckoutInProgress.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The network call itself happens in the commands layer between
//! `begin_submit` and `complete_success`/`complete_failure`; the mutex is
//! never held across the await.

use std::sync::Mutex;

use uuid::Uuid;

use zarlette_core::{CoreError, CoreResult, Money, PaymentMethod, Sale};

/// Where the checkout flow currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutPhase {
    /// No checkout underway.
    Idle,
    /// Payment modal is open, collecting inputs.
    ModalOpen,
    /// A creation request is in flight.
    Submitting,
    /// The sale was persisted; holds the server's authoritative record.
    Success(Box<Sale>),
    /// The request failed; holds the user-facing message. The cart is
    /// untouched.
    Failure(String),
}

/// Everything the commands layer needs to issue the creation request.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    /// Key for the `Idempotency-Key` header. Stable across a retry of the
    /// same attempt.
    pub idempotency_key: Uuid,
    pub payment_method: PaymentMethod,
    /// Free-text notes: `Amount tendered: {x}` or `Reference number: {y}`.
    pub notes: String,
}

#[derive(Debug)]
struct Checkout {
    phase: CheckoutPhase,
    payment_method: PaymentMethod,
    tendered_input: String,
    reference_input: String,
    idempotency_key: Option<Uuid>,
}

impl Default for Checkout {
    fn default() -> Self {
        Checkout {
            phase: CheckoutPhase::Idle,
            payment_method: PaymentMethod::Cash,
            tendered_input: String::new(),
            reference_input: String::new(),
            idempotency_key: None,
        }
    }
}

/// Managed checkout state.
#[derive(Debug, Default)]
pub struct CheckoutState {
    inner: Mutex<Checkout>,
}

impl CheckoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the payment modal.
    ///
    /// Guarded by "cart non-empty"; fails closed with `EmptyCart` and no
    /// state change otherwise. Opening from `Failure` implicitly dismisses
    /// the previous error (the retry path).
    pub fn open(&self, cart_is_empty: bool) -> CoreResult<()> {
        let mut inner = self.lock();

        match inner.phase {
            CheckoutPhase::Idle | CheckoutPhase::Failure(_) => {}
            ref current => {
                return Err(CoreError::InvalidCheckoutState {
                    current: phase_name(current).to_string(),
                })
            }
        }

        if cart_is_empty {
            return Err(CoreError::EmptyCart);
        }

        inner.phase = CheckoutPhase::ModalOpen;
        Ok(())
    }

    /// Switches the payment sub-mode.
    ///
    /// The two modes are mutually exclusive: switching to cash clears the
    /// reference number; switching to online clears the amount tendered
    /// (and with it the displayed change).
    pub fn set_method(&self, method: PaymentMethod) {
        let mut inner = self.lock();
        if inner.payment_method == method {
            return;
        }
        inner.payment_method = method;
        match method {
            PaymentMethod::Cash => inner.reference_input.clear(),
            PaymentMethod::Online => inner.tendered_input.clear(),
        }
    }

    /// Records the cash amount-tendered input (raw text).
    pub fn set_tendered(&self, input: impl Into<String>) {
        self.lock().tendered_input = input.into();
    }

    /// Records the online reference-number input (raw text).
    pub fn set_reference(&self, input: impl Into<String>) {
        self.lock().reference_input = input.into();
    }

    /// The live change amount for the cash sub-mode: `tendered − total`,
    /// shown as zero while tendered is below the total or unparseable.
    pub fn change(&self, grand_total: Money) -> Money {
        let inner = self.lock();
        match inner.tendered_input.trim().parse::<Money>() {
            Ok(tendered) => tendered.saturating_sub_zero(grand_total),
            Err(_) => Money::zero(),
        }
    }

    /// Current payment method.
    pub fn payment_method(&self) -> PaymentMethod {
        self.lock().payment_method
    }

    /// Current phase (cloned snapshot).
    pub fn phase(&self) -> CheckoutPhase {
        self.lock().phase.clone()
    }

    /// Validates the confirm and transitions `ModalOpen → Submitting`.
    ///
    /// ## Guards (fail: no transition, NO network call)
    /// - A submission already outstanding → `CheckoutInProgress`
    /// - Not in `ModalOpen` → `InvalidCheckoutState`
    /// - Cash with tendered missing, unparseable, or below the total →
    ///   `InsufficientTendered`
    /// - Online with a blank reference number → `MissingReference`
    ///
    /// On success the ticket carries the idempotency key: the existing one
    /// when this is a retry of a failed attempt, a freshly minted UUID v4
    /// otherwise.
    pub fn begin_submit(&self, grand_total: Money) -> CoreResult<SubmitTicket> {
        let mut inner = self.lock();

        match inner.phase {
            CheckoutPhase::ModalOpen => {}
            CheckoutPhase::Submitting => return Err(CoreError::CheckoutInProgress),
            ref current => {
                return Err(CoreError::InvalidCheckoutState {
                    current: phase_name(current).to_string(),
                })
            }
        }

        let notes = match inner.payment_method {
            PaymentMethod::Cash => {
                let raw = inner.tendered_input.trim();
                let tendered = raw.parse::<Money>().map_err(|_| {
                    CoreError::InsufficientTendered {
                        tendered: Money::zero(),
                        total: grand_total,
                    }
                })?;
                if tendered < grand_total {
                    return Err(CoreError::InsufficientTendered {
                        tendered,
                        total: grand_total,
                    });
                }
                format!("Amount tendered: {}", raw)
            }
            PaymentMethod::Online => {
                let reference = inner.reference_input.trim();
                if reference.is_empty() {
                    return Err(CoreError::MissingReference);
                }
                format!("Reference number: {}", reference)
            }
        };

        let idempotency_key = *inner.idempotency_key.get_or_insert_with(Uuid::new_v4);

        inner.phase = CheckoutPhase::Submitting;
        Ok(SubmitTicket {
            idempotency_key,
            payment_method: inner.payment_method,
            notes,
        })
    }

    /// `Submitting → Success`: stores the server's sale and rotates the
    /// idempotency key (the attempt is spent).
    pub fn complete_success(&self, sale: Sale) {
        let mut inner = self.lock();
        inner.phase = CheckoutPhase::Success(Box::new(sale));
        inner.idempotency_key = None;
        inner.tendered_input.clear();
        inner.reference_input.clear();
    }

    /// `Submitting → Failure`: stores the user-facing message. The key is
    /// kept so a retry of this attempt reuses it.
    pub fn complete_failure(&self, message: impl Into<String>) {
        let mut inner = self.lock();
        inner.phase = CheckoutPhase::Failure(message.into());
    }

    /// Dismisses a terminal state (`Success`/`Failure`) back to `Idle`.
    /// Inputs survive a failure dismissal so a retry starts pre-filled.
    pub fn dismiss(&self) {
        let mut inner = self.lock();
        if matches!(
            inner.phase,
            CheckoutPhase::Success(_) | CheckoutPhase::Failure(_)
        ) {
            inner.phase = CheckoutPhase::Idle;
        }
    }

    /// Explicitly abandons the modal: back to `Idle`, inputs cleared, key
    /// rotated (the next confirm is a new attempt).
    pub fn cancel(&self) {
        let mut inner = self.lock();
        if inner.phase == CheckoutPhase::ModalOpen {
            inner.phase = CheckoutPhase::Idle;
            inner.tendered_input.clear();
            inner.reference_input.clear();
            inner.idempotency_key = None;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Checkout> {
        self.inner.lock().expect("Checkout mutex poisoned")
    }
}

fn phase_name(phase: &CheckoutPhase) -> &'static str {
    match phase {
        CheckoutPhase::Idle => "idle",
        CheckoutPhase::ModalOpen => "collecting payment",
        CheckoutPhase::Submitting => "submitting",
        CheckoutPhase::Success(_) => "completed",
        CheckoutPhase::Failure(_) => "failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn open_state() -> CheckoutState {
        let state = CheckoutState::new();
        state.open(false).unwrap();
        state
    }

    fn sale() -> Sale {
        Sale {
            id: 1,
            invoice_number: "INV-0001".to_string(),
            created_at: Utc::now(),
            status: Default::default(),
            sale_items: vec![],
            sub_total: Money::from_major(140),
            total_discount: Money::zero(),
            grand_total: Money::from_major(140),
            payment_method: PaymentMethod::Cash,
            notes: None,
        }
    }

    #[test]
    fn test_open_rejects_empty_cart() {
        let state = CheckoutState::new();
        assert!(matches!(state.open(true), Err(CoreError::EmptyCart)));
        assert_eq!(state.phase(), CheckoutPhase::Idle);

        state.open(false).unwrap();
        assert_eq!(state.phase(), CheckoutPhase::ModalOpen);
    }

    #[test]
    fn test_change_computation() {
        let state = open_state();
        let total = Money::from_major(140);

        state.set_tendered("150");
        assert_eq!(state.change(total).to_string(), "10.000");

        // Below the total the display pins to zero.
        state.set_tendered("100");
        assert_eq!(state.change(total).to_string(), "0.000");

        state.set_tendered("garbage");
        assert!(state.change(total).is_zero());
    }

    #[test]
    fn test_cash_confirm_guards() {
        let state = open_state();
        let total = Money::from_major(140);

        state.set_tendered("100");
        assert!(matches!(
            state.begin_submit(total),
            Err(CoreError::InsufficientTendered { .. })
        ));
        // Guard failure leaves the modal open.
        assert_eq!(state.phase(), CheckoutPhase::ModalOpen);

        state.set_tendered("not a number");
        assert!(state.begin_submit(total).is_err());

        state.set_tendered("150");
        let ticket = state.begin_submit(total).unwrap();
        assert_eq!(ticket.payment_method, PaymentMethod::Cash);
        assert_eq!(ticket.notes, "Amount tendered: 150");
        assert_eq!(state.phase(), CheckoutPhase::Submitting);
    }

    #[test]
    fn test_exact_tendered_is_accepted() {
        let state = open_state();
        state.set_tendered("140.000");
        assert!(state.begin_submit(Money::from_major(140)).is_ok());
    }

    #[test]
    fn test_online_confirm_requires_reference() {
        let state = open_state();
        state.set_method(PaymentMethod::Online);

        assert!(matches!(
            state.begin_submit(Money::from_major(140)),
            Err(CoreError::MissingReference)
        ));

        state.set_reference("  GC-12345  ");
        let ticket = state.begin_submit(Money::from_major(140)).unwrap();
        assert_eq!(ticket.notes, "Reference number: GC-12345");
    }

    #[test]
    fn test_switching_mode_clears_other_fields() {
        let state = open_state();
        let total = Money::from_major(140);

        state.set_tendered("150");
        state.set_method(PaymentMethod::Online);
        assert!(state.change(total).is_zero());

        state.set_reference("GC-1");
        state.set_method(PaymentMethod::Cash);
        // Back in online mode the reference must be re-entered.
        state.set_method(PaymentMethod::Online);
        assert!(matches!(
            state.begin_submit(total),
            Err(CoreError::MissingReference)
        ));
    }

    #[test]
    fn test_double_submit_is_rejected() {
        let state = open_state();
        state.set_tendered("150");
        state.begin_submit(Money::from_major(140)).unwrap();

        assert!(matches!(
            state.begin_submit(Money::from_major(140)),
            Err(CoreError::CheckoutInProgress)
        ));
    }

    #[test]
    fn test_idempotency_key_reused_on_retry_rotated_on_success() {
        let state = open_state();
        let total = Money::from_major(140);
        state.set_tendered("150");

        let first = state.begin_submit(total).unwrap();
        state.complete_failure("No response from server. Check your network connection.");

        // Retry of the same attempt: reopen, confirm again, same key.
        state.open(false).unwrap();
        let retry = state.begin_submit(total).unwrap();
        assert_eq!(retry.idempotency_key, first.idempotency_key);

        state.complete_success(sale());
        assert!(matches!(state.phase(), CheckoutPhase::Success(_)));

        // A new attempt after success gets a fresh key.
        state.dismiss();
        state.open(false).unwrap();
        state.set_tendered("150");
        let fresh = state.begin_submit(total).unwrap();
        assert_ne!(fresh.idempotency_key, first.idempotency_key);
    }

    #[test]
    fn test_cancel_rotates_key_and_clears_inputs() {
        let state = open_state();
        state.set_tendered("150");
        let first = state.begin_submit(Money::from_major(140)).unwrap();
        state.complete_failure("boom");
        state.open(false).unwrap();
        state.cancel();

        assert_eq!(state.phase(), CheckoutPhase::Idle);
        state.open(false).unwrap();
        state.set_tendered("150");
        let next = state.begin_submit(Money::from_major(140)).unwrap();
        assert_ne!(next.idempotency_key, first.idempotency_key);
    }

    #[test]
    fn test_failure_preserves_inputs_for_retry() {
        let state = open_state();
        state.set_tendered("150");
        state.begin_submit(Money::from_major(140)).unwrap();
        state.complete_failure("boom");

        state.open(false).unwrap();
        // Tendered survived the failure; confirm works without re-entry.
        assert!(state.begin_submit(Money::from_major(140)).is_ok());
    }
}
