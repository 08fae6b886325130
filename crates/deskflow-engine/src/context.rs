/// The evolving record threaded through one workflow execution.
///
/// `query` is set once at creation; the remaining fields start empty and are
/// filled in by steps as the execution proceeds. Once set, a field is never
/// reverted — steps run strictly sequentially.
#[derive(Debug, Clone, Default)]
pub struct SupportContext {
    pub query: String,
    pub category: String,
    pub sentiment: String,
    pub response: String,
}

impl SupportContext {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

/// Partial update produced by one step.
///
/// Fields left `None` are untouched when the update is applied.
#[derive(Debug, Clone, Default)]
pub struct ContextUpdate {
    pub category: Option<String>,
    pub sentiment: Option<String>,
    pub response: Option<String>,
}

impl ContextUpdate {
    pub fn category(value: impl Into<String>) -> Self {
        Self {
            category: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn sentiment(value: impl Into<String>) -> Self {
        Self {
            sentiment: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn response(value: impl Into<String>) -> Self {
        Self {
            response: Some(value.into()),
            ..Default::default()
        }
    }

    /// Apply this update to a context. The query is never modified.
    pub fn apply(self, context: &mut SupportContext) {
        if let Some(category) = self.category {
            context.category = category;
        }
        if let Some(sentiment) = self.sentiment {
            context.sentiment = sentiment;
        }
        if let Some(response) = self.response {
            context.response = response;
        }
    }
}
