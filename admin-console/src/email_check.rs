use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

/// `local@domain.tld`, no whitespace.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("Invalid email regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

pub const TAKEN_EMAILS: [&str; 2] = ["admin@example.com", "test@example.com"];

/// Latency of the simulated round trip on the create form.
pub const CREATE_CHECK_DELAY: Duration = Duration::from_millis(1500);
/// Latency of the simulated round trip on the edit form.
pub const EDIT_CHECK_DELAY: Duration = Duration::from_millis(1000);

#[async_trait]
pub trait UniquenessCheck: Send + Sync {
    async fn is_taken(&self, email: &str) -> bool;
}

/// Stand-in for a server-side uniqueness lookup: a fixed list plus a delay.
#[derive(Debug, Clone)]
pub struct BlocklistCheck {
    taken: Vec<String>,
    delay: Duration,
}

impl BlocklistCheck {
    pub fn new(taken: impl IntoIterator<Item = impl Into<String>>, delay: Duration) -> Self {
        Self {
            taken: taken
                .into_iter()
                .map(|e| e.into().to_lowercase())
                .collect(),
            delay,
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self::new(TAKEN_EMAILS, delay)
    }
}

#[async_trait]
impl UniquenessCheck for BlocklistCheck {
    async fn is_taken(&self, email: &str) -> bool {
        tokio::time::sleep(self.delay).await;
        let email = email.trim().to_lowercase();
        self.taken.iter().any(|taken| *taken == email)
    }
}
