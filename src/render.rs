//! Text rendering of the analysis screen.

use std::fmt::Write;

use serde_json::Value;

use crate::{constants::*, form::AnalysisForm};

/// Two-space indented JSON, keys in the order the server sent them.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

pub fn format_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;

    let b = bytes as f64;
    if b >= MIB {
        format!("{:.1} MB", b / MIB)
    } else if b >= KIB {
        format!("{:.1} KB", b / KIB)
    } else {
        format!("{bytes} B")
    }
}

pub fn submit_label(form: &AnalysisForm) -> &'static str {
    if form.is_loading() {
        SUBMIT_LOADING_LABEL
    } else {
        SUBMIT_LABEL
    }
}

pub fn render_view(form: &AnalysisForm) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{APP_TITLE}");
    let _ = writeln!(out, "{APP_SUBTITLE}");
    let _ = writeln!(out);

    let _ = writeln!(out, "Upload Ultrasound Image");
    match form.selected() {
        Some(file) => {
            let _ = writeln!(
                out,
                "  {} ({}, {})",
                file.name,
                file.mime_type,
                format_size(file.size())
            );
        }
        None => {
            let _ = writeln!(out, "  no file selected (PNG, JPG up to 10MB)");
        }
    }

    if let Some(preview) = form.preview() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Image Preview");
        match preview.dimensions {
            Some((w, h)) => {
                let _ = writeln!(out, "  {w}x{h} pixels");
            }
            None => {
                let _ = writeln!(out, "  preview unavailable");
            }
        }
    }

    if let Some(error) = form.error() {
        let _ = writeln!(out);
        let _ = writeln!(out, "! {error}");
    }

    let _ = writeln!(out);
    if form.can_submit() {
        let _ = writeln!(out, "[ {} ]", submit_label(form));
    } else {
        let _ = writeln!(out, "[ {} ] (disabled)", submit_label(form));
    }

    if let Some(result) = form.result() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Analysis Results");
        for line in pretty_json(result).lines() {
            let _ = writeln!(out, "  {line}");
        }
    }

    out
}
