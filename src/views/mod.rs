//! Page view models.
//!
//! Each page declares its queries through [`PageContext`], derives what it shows
//! from the results with pure functions, and renders to plain text lines. Pages
//! never see raw transport failures; they branch on the query's error flag and
//! fall back to an empty state.

pub mod calendar;
pub mod case_detail;
pub mod cases;
pub mod courts;
pub mod dashboard;
pub mod delays;
pub mod documents;
pub mod judges;
pub mod ml;
pub mod scheduling;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::api::Api;
use crate::models::User;
use crate::notify::{Notification, Notifier};
use crate::query::{QueryClient, QueryResult, QueryStatus};

/// Colour class of a badge or bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Gray,
    Blue,
    Yellow,
    Amber,
    Orange,
    Red,
    Purple,
    Green,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Gray => "gray",
            Tone::Blue => "blue",
            Tone::Yellow => "yellow",
            Tone::Amber => "amber",
            Tone::Orange => "orange",
            Tone::Red => "red",
            Tone::Purple => "purple",
            Tone::Green => "green",
        }
    }
}

/// What a list section shows. Distinct from the query's error flag: a failed
/// query with no prior data renders as `Empty`.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// Not requested yet (precondition unmet).
    Idle,
    Loading,
    Empty,
    Populated(T),
}

impl<T> ViewState<Vec<T>> {
    /// Classify `items`, already derived from `result`'s data.
    pub fn list<Q>(result: &QueryResult<Q>, items: Vec<T>) -> Self {
        match result.status {
            QueryStatus::Idle if result.data.is_none() => ViewState::Idle,
            QueryStatus::Loading if result.data.is_none() => ViewState::Loading,
            _ if items.is_empty() => ViewState::Empty,
            _ => ViewState::Populated(items),
        }
    }
}

impl<T> ViewState<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, ViewState::Empty)
    }
}

/// Everything a page needs to declare queries and run mutations.
#[derive(Clone)]
pub struct PageContext {
    pub api: Api,
    pub queries: QueryClient,
    pub notifier: Arc<dyn Notifier>,
    pub user: Option<User>,
}

impl PageContext {
    pub fn court_id(&self) -> Option<i64> {
        self.user.as_ref().and_then(|u| u.court_id)
    }

    pub fn notify_success(&self, message: &str) {
        self.notifier.notify(Notification::success(message));
    }

    pub fn notify_error(&self, message: &str) {
        self.notifier.notify(Notification::error(message));
    }
}

/// Tracks whether the page that started a load is still on screen.
///
/// Results that arrive after [`MountScope::dispose`] are dropped.
#[derive(Debug, Clone, Default)]
pub struct MountScope {
    disposed: Arc<AtomicBool>,
}

impl MountScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        !self.disposed.load(Ordering::SeqCst)
    }

    /// Pass `value` through only if the page is still mounted.
    pub fn apply<T>(&self, value: T) -> Option<T> {
        if self.is_mounted() {
            Some(value)
        } else {
            tracing::debug!("discarding result for disposed page");
            None
        }
    }
}

/// A rendered page.
pub trait Page {
    fn render(&self) -> Vec<String>;
}

/// Case-insensitive substring match.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub(crate) const LOADING: &str = "Loading...";
