use serde_json::Value;

use crate::{
    Analyzer,
    constants::{ANALYSIS_FAILED_MESSAGE, NO_FILE_SELECTED_MESSAGE},
    error::Result,
    image_processor::{Preview, SelectedFile},
};

/// State behind the upload-and-analyze screen.
#[derive(Debug, Default)]
pub struct AnalysisForm {
    selected: Option<SelectedFile>,
    preview: Option<Preview>,
    result: Option<Value>,
    loading: bool,
    error: Option<String>,
}

/// An in-flight submission, handed out by [`AnalysisForm::begin_submit`].
#[derive(Debug)]
pub struct Submission {
    file: SelectedFile,
}

impl Submission {
    pub fn file(&self) -> &SelectedFile {
        &self.file
    }
}

impl AnalysisForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        if !file.is_image() {
            log::warn!("{} is {}, not an image", file.name, file.mime_type);
        }
        self.preview = Some(Preview::from_file(&file));
        self.selected = Some(file);
        self.error = None;
    }

    /// Enabled state of the submit control.
    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.loading
    }

    /// Validates the selection and enters the loading state.
    ///
    /// Returns `None` when there is nothing to send: either no file is
    /// selected (the validation message is set) or a submission is already
    /// loading.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.loading {
            log::debug!("submission already in flight, ignoring");
            return None;
        }
        let Some(file) = &self.selected else {
            self.error = Some(NO_FILE_SELECTED_MESSAGE.to_string());
            return None;
        };

        let submission = Submission { file: file.clone() };
        self.loading = true;
        self.error = None;
        self.result = None;
        Some(submission)
    }

    pub fn finish_submit(&mut self, outcome: Result<Value>) {
        match outcome {
            Ok(value) => {
                self.result = Some(value);
                self.error = None;
            }
            Err(e) => {
                log::error!("Error: {e}");
                self.result = None;
                self.error = Some(ANALYSIS_FAILED_MESSAGE.to_string());
            }
        }
        self.loading = false;
    }

    pub async fn submit<A: Analyzer>(&mut self, analyzer: &A) {
        if let Some(submission) = self.begin_submit() {
            let outcome = analyzer.analyze(submission.file()).await;
            self.finish_submit(outcome);
        }
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::{error::Error, image_processor::tests::png_bytes};

    enum Reply {
        Json(Value),
        Status(StatusCode),
    }

    struct StubAnalyzer {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl StubAnalyzer {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Analyzer for StubAnalyzer {
        async fn analyze(&self, _file: &SelectedFile) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Reply::Json(value) => Ok(value.clone()),
                Reply::Status(status) => Err(Error::Status {
                    status: *status,
                    body: String::new(),
                }),
            }
        }
    }

    fn scan() -> SelectedFile {
        SelectedFile::from_bytes("scan.png", png_bytes(8, 8))
    }

    #[tokio::test]
    async fn submit_without_file_never_calls_analyzer() {
        let analyzer = StubAnalyzer::new(Reply::Json(json!({})));
        let mut form = AnalysisForm::new();

        form.submit(&analyzer).await;

        assert_eq!(analyzer.calls(), 0);
        assert_eq!(form.error(), Some(NO_FILE_SELECTED_MESSAGE));
        assert!(!form.is_loading());
        assert!(!form.can_submit());
    }

    #[tokio::test]
    async fn selecting_clears_errors_and_builds_preview() {
        let analyzer = StubAnalyzer::new(Reply::Status(StatusCode::INTERNAL_SERVER_ERROR));
        let mut form = AnalysisForm::new();

        form.submit(&analyzer).await;
        assert!(form.error().is_some());
        form.select_file(scan());
        assert_eq!(form.error(), None);

        form.submit(&analyzer).await;
        assert_eq!(form.error(), Some(ANALYSIS_FAILED_MESSAGE));
        form.select_file(scan());
        assert_eq!(form.error(), None);

        let preview = form.preview().unwrap();
        assert!(!preview.data_url.is_empty());
        assert_eq!(preview.dimensions, Some((8, 8)));
    }

    #[tokio::test]
    async fn success_stores_response_verbatim() {
        let body = json!({"label": "normal", "confidence": 0.92});
        let analyzer = StubAnalyzer::new(Reply::Json(body.clone()));
        let mut form = AnalysisForm::new();
        form.select_file(scan());

        form.submit(&analyzer).await;

        assert_eq!(analyzer.calls(), 1);
        assert_eq!(form.result(), Some(&body));
        assert_eq!(form.error(), None);
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn failure_shows_static_message_and_drops_old_result() {
        let mut form = AnalysisForm::new();
        form.select_file(scan());
        form.submit(&StubAnalyzer::new(Reply::Json(json!({"label": "normal"}))))
            .await;
        assert!(form.result().is_some());

        let failing = StubAnalyzer::new(Reply::Status(StatusCode::BAD_GATEWAY));
        form.submit(&failing).await;

        assert_eq!(form.error(), Some(ANALYSIS_FAILED_MESSAGE));
        assert_eq!(form.result(), None);
        assert!(!form.is_loading());
        assert!(form.can_submit());
    }

    #[test]
    fn loading_spans_begin_to_finish() {
        let mut form = AnalysisForm::new();
        form.select_file(scan());
        assert!(!form.is_loading());

        let submission = form.begin_submit().unwrap();
        assert_eq!(submission.file().name, "scan.png");
        assert!(form.is_loading());
        assert!(!form.can_submit());

        form.finish_submit(Ok(json!({"label": "abnormal"})));
        assert!(!form.is_loading());

        form.begin_submit().unwrap();
        assert!(form.is_loading());
        form.finish_submit(Err(Error::Status {
            status: StatusCode::NOT_FOUND,
            body: "no route".to_string(),
        }));
        assert!(!form.is_loading());
    }

    #[test]
    fn second_submit_while_loading_is_inert() {
        let mut form = AnalysisForm::new();
        form.select_file(scan());

        assert!(form.begin_submit().is_some());
        assert!(form.begin_submit().is_none());
        assert!(form.is_loading());
        assert_eq!(form.error(), None);
    }
}
