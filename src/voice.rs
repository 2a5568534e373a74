use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::VoiceError;
use crate::models::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentAction {
    NavigateHome,
    NavigateGallery,
    NavigateEligibility,
    NavigateMobileApp,
    NavigateRegister,
    NavigateLogin,
    ShowHelp,
    ScrollToTop,
    ScrollToBottom,
    Unrecognized,
}

/// Evaluated top to bottom; the first rule with a matching phrase wins.
const RULES: &[(&[&str], IntentAction)] = &[
    (&["home", "homepage"], IntentAction::NavigateHome),
    (&["gallery"], IntentAction::NavigateGallery),
    (&["eligibility"], IntentAction::NavigateEligibility),
    (&["mobile app", "app"], IntentAction::NavigateMobileApp),
    (&["register", "sign up"], IntentAction::NavigateRegister),
    (&["login", "sign in"], IntentAction::NavigateLogin),
    (&["help", "assistance"], IntentAction::ShowHelp),
    (&["scroll up"], IntentAction::ScrollToTop),
    (&["scroll down"], IntentAction::ScrollToBottom),
];

pub fn classify(utterance: &str) -> IntentAction {
    let utterance = utterance.to_lowercase();
    RULES
        .iter()
        .find(|(phrases, _)| phrases.iter().any(|phrase| utterance.contains(phrase)))
        .map(|(_, action)| *action)
        .unwrap_or(IntentAction::Unrecognized)
}

impl IntentAction {
    pub fn route(self) -> Option<&'static str> {
        match self {
            IntentAction::NavigateHome => Some("/"),
            IntentAction::NavigateGallery => Some("/gallery"),
            IntentAction::NavigateEligibility => Some("/eligibility"),
            IntentAction::NavigateMobileApp => Some("/mobile-app"),
            IntentAction::NavigateRegister => Some("/register"),
            IntentAction::NavigateLogin => Some("/login"),
            IntentAction::ShowHelp
            | IntentAction::ScrollToTop
            | IntentAction::ScrollToBottom
            | IntentAction::Unrecognized => None,
        }
    }

    pub fn is_navigation(self) -> bool {
        self.route().is_some()
    }

    pub fn notice(self) -> Notice {
        match self {
            IntentAction::ShowHelp => Notice::info(
                "Help Available",
                "You can navigate using voice commands like 'go to home', 'show gallery', 'open login', etc.",
            ),
            IntentAction::ScrollToTop => Notice::info("Scrolling", "Moving to the top of the page."),
            IntentAction::ScrollToBottom => {
                Notice::info("Scrolling", "Moving to the bottom of the page.")
            }
            IntentAction::Unrecognized => Notice::info(
                "Command Not Recognized",
                "Try commands like 'go to home', 'show gallery', 'open login', or 'help' for assistance.",
            ),
            navigation => Notice::info(
                "Navigating",
                format!("Opening {}", navigation.route().unwrap_or("/")),
            ),
        }
    }
}

/// Host speech-to-text capability.
#[async_trait]
pub trait SpeechCapture: Send + Sync {
    fn is_available(&self) -> bool;

    /// Resolves with a single recognized utterance.
    async fn listen_once(&self) -> Result<String, VoiceError>;
}

/// Fire-and-forget audible feedback.
pub trait SpeechSynthesis: Send + Sync {
    fn speak(&self, text: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceOutcome {
    pub utterance: String,
    pub action: IntentAction,
}

pub struct VoiceAssistant<C, S> {
    capture: C,
    synthesis: S,
    listen_timeout: Duration,
}

impl<C: SpeechCapture, S: SpeechSynthesis> VoiceAssistant<C, S> {
    pub fn new(capture: C, synthesis: S, listen_timeout: Duration) -> Result<Self, VoiceError> {
        if !capture.is_available() {
            return Err(VoiceError::Unavailable);
        }
        Ok(Self {
            capture,
            synthesis,
            listen_timeout,
        })
    }

    /// One listen, one classification. Failures are returned as-is and never
    /// retried; the caller decides whether to start another listen.
    pub async fn listen_and_classify(&self) -> Result<VoiceOutcome, VoiceError> {
        let utterance = tokio::time::timeout(self.listen_timeout, self.capture.listen_once())
            .await
            .map_err(|_| VoiceError::TimedOut)??;

        let utterance = utterance.trim().to_lowercase();
        if utterance.is_empty() {
            return Err(VoiceError::NoSpeech);
        }

        let action = classify(&utterance);
        tracing::info!(%utterance, ?action, "voice command classified");
        self.synthesis.speak(&action.notice().description);

        Ok(VoiceOutcome { utterance, action })
    }
}

/// Reads a typed phrase from stdin in place of a microphone.
pub struct LineCapture {
    enabled: bool,
}

impl LineCapture {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

#[async_trait]
impl SpeechCapture for LineCapture {
    fn is_available(&self) -> bool {
        self.enabled
    }

    async fn listen_once(&self) -> Result<String, VoiceError> {
        let mut line = String::new();
        let read = BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await
            .map_err(|err| VoiceError::Recognition(err.to_string()))?;
        if read == 0 {
            return Err(VoiceError::Recognition("input closed".to_string()));
        }
        Ok(line)
    }
}

pub struct TracingSynthesis;

impl SpeechSynthesis for TracingSynthesis {
    fn speak(&self, text: &str) {
        tracing::info!(target: "speech", "{text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct FakeCapture {
        available: bool,
        reply: Result<String, VoiceError>,
        delay: Duration,
        calls: Arc<Mutex<usize>>,
    }

    impl FakeCapture {
        fn replying(reply: Result<String, VoiceError>) -> Self {
            Self {
                available: true,
                reply,
                delay: Duration::ZERO,
                calls: Arc::new(Mutex::new(0)),
            }
        }
    }

    #[async_trait]
    impl SpeechCapture for FakeCapture {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn listen_once(&self) -> Result<String, VoiceError> {
            *self.calls.lock().unwrap() += 1;
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.reply.clone()
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSynthesis {
        spoken: Arc<Mutex<Vec<String>>>,
    }

    impl SpeechSynthesis for RecordingSynthesis {
        fn speak(&self, text: &str) {
            self.spoken.lock().unwrap().push(text.to_string());
        }
    }

    #[test]
    fn navigation_phrases_map_to_routes() {
        let cases = [
            ("go to home", IntentAction::NavigateHome, Some("/")),
            ("open the homepage", IntentAction::NavigateHome, Some("/")),
            ("show gallery", IntentAction::NavigateGallery, Some("/gallery")),
            ("check eligibility", IntentAction::NavigateEligibility, Some("/eligibility")),
            ("download the app", IntentAction::NavigateMobileApp, Some("/mobile-app")),
            ("i want to register", IntentAction::NavigateRegister, Some("/register")),
            ("sign up now", IntentAction::NavigateRegister, Some("/register")),
            ("open login", IntentAction::NavigateLogin, Some("/login")),
            ("sign in please", IntentAction::NavigateLogin, Some("/login")),
        ];
        for (utterance, expected, route) in cases {
            let action = classify(utterance);
            assert_eq!(action, expected, "{utterance}");
            assert_eq!(action.route(), route);
            assert!(action.is_navigation());
        }
    }

    #[test]
    fn accessibility_phrases_do_not_navigate() {
        assert_eq!(classify("i need assistance"), IntentAction::ShowHelp);
        assert_eq!(classify("help"), IntentAction::ShowHelp);
        assert_eq!(classify("scroll up"), IntentAction::ScrollToTop);
        assert_eq!(classify("please scroll down"), IntentAction::ScrollToBottom);
        assert!(!IntentAction::ShowHelp.is_navigation());
        assert_eq!(IntentAction::ScrollToBottom.route(), None);
    }

    #[test]
    fn mobile_app_phrase_is_recognized() {
        assert_eq!(
            classify("show me the mobile app please"),
            IntentAction::NavigateMobileApp
        );
    }

    #[test]
    fn login_rule_precedes_help_rule() {
        assert_eq!(classify("i need help to sign in"), IntentAction::NavigateLogin);
    }

    #[test]
    fn earlier_rules_shadow_later_ones() {
        // "app" is checked before "register"
        assert_eq!(classify("register in the app"), IntentAction::NavigateMobileApp);
        assert_eq!(classify("home gallery"), IntentAction::NavigateHome);
    }

    #[test]
    fn unknown_text_is_unrecognized() {
        assert_eq!(classify("xyz123 nonsense"), IntentAction::Unrecognized);
        assert_eq!(classify(""), IntentAction::Unrecognized);
        assert_eq!(
            IntentAction::Unrecognized.notice().title,
            "Command Not Recognized"
        );
    }

    #[test]
    fn classification_ignores_case() {
        assert_eq!(classify("GO TO GALLERY"), classify("go to gallery"));
        assert_eq!(classify("Scroll Up"), IntentAction::ScrollToTop);
    }

    #[test]
    fn assistant_requires_available_capture() {
        let mut capture = FakeCapture::replying(Ok("home".into()));
        capture.available = false;
        let result = VoiceAssistant::new(capture, RecordingSynthesis::default(), Duration::from_secs(1));
        assert!(matches!(result, Err(VoiceError::Unavailable)));
        assert_eq!(
            VoiceError::Unavailable.notice().title,
            "Voice Recognition Not Supported"
        );
    }

    #[tokio::test]
    async fn listen_classifies_and_speaks_feedback() {
        let synthesis = RecordingSynthesis::default();
        let assistant = VoiceAssistant::new(
            FakeCapture::replying(Ok("  Show Gallery \n".into())),
            synthesis.clone(),
            Duration::from_secs(1),
        )
        .unwrap();

        let outcome = assistant.listen_and_classify().await.unwrap();
        assert_eq!(outcome.utterance, "show gallery");
        assert_eq!(outcome.action, IntentAction::NavigateGallery);
        assert_eq!(
            synthesis.spoken.lock().unwrap().as_slice(),
            ["Opening /gallery".to_string()]
        );
    }

    #[tokio::test]
    async fn recognition_failure_is_not_retried() {
        let capture = FakeCapture::replying(Err(VoiceError::Recognition("network".into())));
        let calls = capture.calls.clone();
        let synthesis = RecordingSynthesis::default();
        let assistant =
            VoiceAssistant::new(capture, synthesis.clone(), Duration::from_secs(1)).unwrap();

        let err = assistant.listen_and_classify().await.unwrap_err();
        assert_eq!(err, VoiceError::Recognition("network".into()));
        assert_eq!(err.notice().title, "Voice Recognition Error");
        assert_eq!(*calls.lock().unwrap(), 1);
        assert!(synthesis.spoken.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_utterance_counts_as_no_speech() {
        let assistant = VoiceAssistant::new(
            FakeCapture::replying(Ok("   ".into())),
            RecordingSynthesis::default(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            assistant.listen_and_classify().await.unwrap_err(),
            VoiceError::NoSpeech
        );
    }

    #[tokio::test(start_paused = true)]
    async fn slow_capture_times_out() {
        let mut capture = FakeCapture::replying(Ok("home".into()));
        capture.delay = Duration::from_secs(30);
        let assistant =
            VoiceAssistant::new(capture, RecordingSynthesis::default(), Duration::from_secs(5))
                .unwrap();
        assert_eq!(
            assistant.listen_and_classify().await.unwrap_err(),
            VoiceError::TimedOut
        );
    }
}
