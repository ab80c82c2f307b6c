use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

pub type PageId = u64;
pub type BookmarkId = u64;

/// Identifier of a search engine as known by the search-engine registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EngineId(pub Arc<str>);

impl EngineId {
    pub fn new(id: &str) -> Self {
        Self(Arc::from(id))
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle returned by a collaborator's `subscribe`; hand it back to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookmarkRef {
    pub id: BookmarkId,
    pub url: String,
    pub title: String,
    pub keyword: Option<String>,
}

/// Named icon; rendering is the host's business.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Icon(pub Arc<str>);

impl Icon {
    pub fn named(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IconMode {
    #[default]
    Normal,
    Active,
    Disabled,
}

/// Where a navigation, search or bookmark-open should land.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpenHint {
    #[default]
    CurrentTab,
    NewTab,
    NewBackgroundTab,
    NewWindow,
}

/// The single classified result of submitting address text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Navigate {
        url: String,
        hint: OpenHint,
    },
    OpenBookmark {
        bookmark: BookmarkRef,
        hint: OpenHint,
    },
    Search {
        query: String,
        engine: EngineId,
        hint: OpenHint,
    },
}

impl SubmissionOutcome {
    pub fn hint(&self) -> OpenHint {
        match self {
            SubmissionOutcome::Navigate { hint, .. }
            | SubmissionOutcome::OpenBookmark { hint, .. }
            | SubmissionOutcome::Search { hint, .. } => *hint,
        }
    }
}

/// Page notifications a field can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageSignal {
    IconChanged,
    AboutToClose,
    LoadPluginsChanged,
}

/// A value held by the configuration store.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl SettingValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}
