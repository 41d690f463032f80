//! PII guard
//!
//! Two phases over the bulk input, both before any judgment:
//! a deterministic regex scan, then capability-assisted person-name
//! detection whose findings are replaced with initials.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use audit_domain::pii::{anonymize_names, has_blocking, parse_detected_names};
use audit_domain::{NameReplacement, PiiIssue, PiiScanner, PiiType, PromptTemplate};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Outcome of guarding one submission
#[derive(Debug, Clone, PartialEq)]
pub struct PiiCheck {
    /// Regex findings followed by any person-name finding
    pub issues: Vec<PiiIssue>,
    /// Names returned by the detector
    pub names: Vec<String>,
    pub replacements: Vec<NameReplacement>,
    /// Input with detected names replaced by initials
    pub anonymized_text: String,
}

impl PiiCheck {
    /// Any HIGH issue blocks
    pub fn is_blocked(&self) -> bool {
        has_blocking(&self.issues)
    }

    /// Blocked by something other than detected person names
    pub fn is_blocked_excluding_names(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.is_blocking() && i.pii_type != PiiType::PersonNames)
    }
}

pub struct PiiGuard<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    prefix_chars: usize,
    timeout: Duration,
}

impl<G: LlmGateway + 'static> PiiGuard<G> {
    pub fn new(gateway: Arc<G>, prefix_chars: usize) -> Self {
        Self {
            gateway,
            prefix_chars,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run both phases
    pub async fn check(&self, text: &str) -> Result<PiiCheck, GatewayError> {
        let mut issues = PiiScanner::scan(text);
        debug!("Regex scan found {} issue class(es)", issues.len());

        let names = self.detect_names(text).await?;
        let (anonymized_text, replacements) = anonymize_names(text, &names);
        if !replacements.is_empty() {
            info!("Replaced {} person name(s) with initials", replacements.len());
            issues.push(PiiIssue::person_names(replacements.clone()));
        }

        Ok(PiiCheck {
            issues,
            names,
            replacements,
            anonymized_text,
        })
    }

    async fn detect_names(&self, text: &str) -> Result<Vec<String>, GatewayError> {
        let prefix: String = text.chars().take(self.prefix_chars).collect();
        let call = async {
            let session = self
                .gateway
                .create_session_with_system_prompt(PromptTemplate::name_detection_system())
                .await?;
            session
                .send(&PromptTemplate::name_detection_prompt(&prefix))
                .await
        };
        let answer = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| GatewayError::Timeout)??;
        Ok(parse_detected_names(&answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::ScriptedGateway;
    use audit_domain::Severity;

    #[tokio::test]
    async fn test_clean_text_passes() {
        let gateway = Arc::new(ScriptedGateway::answering("RATING: A"));
        let guard = PiiGuard::new(gateway.clone(), 8000);

        let check = guard.check("Sore throat for 2 days. Advised fluids.").await.unwrap();
        assert!(check.issues.is_empty());
        assert!(!check.is_blocked());
        assert_eq!(gateway.name_calls(), 1);
        assert_eq!(gateway.judgment_calls(), 0);
    }

    #[tokio::test]
    async fn test_names_replaced_with_initials() {
        let gateway =
            Arc::new(ScriptedGateway::answering("RATING: A").with_names(r#"[{"name": "John Smith"}]"#));
        let guard = PiiGuard::new(gateway, 8000);

        let check = guard
            .check("Seen with wife. john smith reports cough.")
            .await
            .unwrap();

        assert_eq!(check.anonymized_text, "Seen with wife. JS reports cough.");
        assert_eq!(check.replacements, vec![NameReplacement::new("John Smith", "JS")]);
        let names = check.issues.iter().find(|i| i.pii_type == PiiType::PersonNames).unwrap();
        assert_eq!(names.severity, Severity::High);
        assert!(check.is_blocked());
        assert!(!check.is_blocked_excluding_names());
    }

    #[tokio::test]
    async fn test_medium_issue_does_not_block() {
        let gateway = Arc::new(ScriptedGateway::answering("RATING: A"));
        let guard = PiiGuard::new(gateway, 8000);

        let check = guard.check("Contact via test@example.com").await.unwrap();
        assert_eq!(check.issues.len(), 1);
        assert_eq!(check.issues[0].pii_type, PiiType::Email);
        assert!(!check.is_blocked());
    }

    #[tokio::test]
    async fn test_name_detection_failure_propagates() {
        let gateway = Arc::new(ScriptedGateway::answering("RATING: A").failing_names());
        let guard = PiiGuard::new(gateway, 8000);

        assert!(guard.check("text").await.is_err());
    }

    #[tokio::test]
    async fn test_slow_name_detection_times_out() {
        let gateway = Arc::new(
            ScriptedGateway::answering("RATING: A").with_delay(Duration::from_millis(200)),
        );
        let guard = PiiGuard::new(gateway, 8000).with_timeout(Duration::from_millis(20));

        let err = guard.check("Cough.").await.unwrap_err();
        assert_eq!(err, GatewayError::Timeout);
    }
}
