pub const DEFAULT_PREDICT_ENDPOINT: &str = "http://localhost:8000/predict";

/// Multipart field the inference server reads the image from.
pub const FILE_FIELD_NAME: &str = "file";

pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

// --- User-facing text ---

pub const APP_TITLE: &str = "ImagoMum Ultrasound Analysis";
pub const APP_SUBTITLE: &str = "Upload your ultrasound image for instant AI-powered analysis";

pub const NO_FILE_SELECTED_MESSAGE: &str = "Please select an image first";
pub const ANALYSIS_FAILED_MESSAGE: &str = "Error analyzing image. Please try again.";

pub const SUBMIT_LABEL: &str = "Analyze Image";
pub const SUBMIT_LOADING_LABEL: &str = "Analyzing...";
