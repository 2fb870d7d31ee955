//! Live query subscriptions
//!
//! A subscription registers interest in a query and receives a sequence of
//! full result-set snapshots over a channel: one immediately, then one after
//! every write to the collection, until it is cancelled. Every snapshot is
//! tagged with the subscription id and the month it was requested for, so a
//! consumer that has moved on to another month can recognize and discard
//! pushes that were already in flight.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Expense, Income, SelectedMonth};

/// Identifier of a live subscription, unique within the process
pub type SubscriptionId = u64;

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Shared flag that stops a subscription from receiving further pushes
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A query whose result set can be pushed to subscribers
pub trait LiveQuery<T>: Clone {
    /// Whether a record belongs to the result set
    fn matches(&self, record: &T) -> bool;

    /// The month the query was requested for
    fn month(&self) -> SelectedMonth;
}

/// Incomes whose month label equals the selected month's label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeQuery {
    month: SelectedMonth,
    label: String,
}

impl IncomeQuery {
    pub fn for_month(month: SelectedMonth) -> Self {
        Self {
            month,
            label: month.label(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl LiveQuery<Income> for IncomeQuery {
    fn matches(&self, record: &Income) -> bool {
        record.month == self.label
    }

    fn month(&self) -> SelectedMonth {
        self.month
    }
}

/// Expenses dated within an inclusive range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseQuery {
    month: SelectedMonth,
    start: NaiveDate,
    end: NaiveDate,
}

impl ExpenseQuery {
    /// `[first_day, last_day]` of the month
    pub fn for_month(month: SelectedMonth) -> Self {
        Self {
            month,
            start: month.first_day(),
            end: month.last_day(),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

impl LiveQuery<Expense> for ExpenseQuery {
    fn matches(&self, record: &Expense) -> bool {
        record.date >= self.start && record.date <= self.end
    }

    fn month(&self) -> SelectedMonth {
        self.month
    }
}

/// One pushed result set
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub subscription: SubscriptionId,
    pub month: SelectedMonth,
    pub records: Vec<T>,
}

/// Consumer side of a live query
///
/// Dropping the handle cancels the subscription.
#[derive(Debug)]
pub struct Subscription<T> {
    id: SubscriptionId,
    month: SelectedMonth,
    receiver: Receiver<Snapshot<T>>,
    token: CancellationToken,
}

impl<T> Subscription<T> {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn month(&self) -> SelectedMonth {
        self.month
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Drain every pending push and keep the newest one
    ///
    /// Each snapshot is a full replacement, so older ones in the queue are
    /// superseded. Returns `None` once cancelled.
    pub fn try_latest(&self) -> Option<Snapshot<T>> {
        let mut latest = None;
        loop {
            if self.token.is_cancelled() {
                return None;
            }
            match self.receiver.try_recv() {
                Ok(snapshot) => latest = Some(snapshot),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        latest
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

struct Registration<Q, T> {
    id: SubscriptionId,
    query: Q,
    sender: Sender<Snapshot<T>>,
    token: CancellationToken,
}

impl<Q: LiveQuery<T>, T: Clone> Registration<Q, T> {
    /// Push the matching records; false when the consumer is gone
    fn push(&self, records: &[T]) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        let snapshot = Snapshot {
            subscription: self.id,
            month: self.query.month(),
            records: records
                .iter()
                .filter(|r| self.query.matches(r))
                .cloned()
                .collect(),
        };
        self.sender.send(snapshot).is_ok()
    }
}

/// Producer side: the set of live registrations for one collection
pub struct SubscriptionHub<Q, T> {
    registrations: Mutex<Vec<Registration<Q, T>>>,
}

impl<Q: LiveQuery<T>, T: Clone> SubscriptionHub<Q, T> {
    pub fn new() -> Self {
        Self {
            registrations: Mutex::new(Vec::new()),
        }
    }

    /// Register a query and push the current result set right away
    pub fn subscribe(&self, query: Q, current: &[T]) -> BudgetResult<Subscription<T>> {
        let (sender, receiver) = mpsc::channel();
        let token = CancellationToken::new();
        let registration = Registration {
            id: NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed),
            query,
            sender,
            token: token.clone(),
        };

        let subscription = Subscription {
            id: registration.id,
            month: registration.query.month(),
            receiver,
            token,
        };

        registration.push(current);
        self.lock()?.push(registration);

        Ok(subscription)
    }

    /// Remove a registration and cancel its token
    pub fn unsubscribe(&self, id: SubscriptionId) -> BudgetResult<bool> {
        let mut registrations = self.lock()?;
        let before = registrations.len();
        registrations.retain(|r| {
            if r.id == id {
                r.token.cancel();
                false
            } else {
                true
            }
        });
        Ok(registrations.len() != before)
    }

    /// Push the new state of the collection to every live registration,
    /// pruning those that were cancelled or whose receiver was dropped
    pub fn publish(&self, records: &[T]) -> BudgetResult<()> {
        let mut registrations = self.lock()?;
        registrations.retain(|r| r.push(records));
        Ok(())
    }

    /// Number of registrations that have not been pruned yet
    pub fn active_count(&self) -> usize {
        self.registrations
            .lock()
            .map(|r| r.iter().filter(|r| !r.token.is_cancelled()).count())
            .unwrap_or(0)
    }

    fn lock(&self) -> BudgetResult<std::sync::MutexGuard<'_, Vec<Registration<Q, T>>>> {
        self.registrations
            .lock()
            .map_err(|e| BudgetError::Subscription(format!("Failed to acquire lock: {}", e)))
    }
}

impl<Q: LiveQuery<T>, T: Clone> Default for SubscriptionHub<Q, T> {
    fn default() -> Self {
        Self::new()
    }
}
