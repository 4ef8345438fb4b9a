use std::{fs, path::PathBuf, process::ExitCode, time::Duration};

use arboard::Clipboard;
use clap::Parser;
use imagomum::{
    AnalysisForm, PredictClient, SelectedFile, constants::DEFAULT_PREDICT_ENDPOINT, render,
};
use url::Url;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ultrasound image
    image_path: Option<PathBuf>,

    /// Inference endpoint the image is posted to
    #[arg(long, default_value = DEFAULT_PREDICT_ENDPOINT)]
    endpoint: Url,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    timeout: Option<u64>,

    /// Save the results next to the image with a .json extension
    #[arg(long)]
    json: bool,

    /// Copy the results to the clipboard
    #[arg(long)]
    clip: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();

    let args = Args::parse();

    let client = PredictClient::new(args.endpoint, args.timeout.map(Duration::from_secs))?;
    let mut form = AnalysisForm::new();

    if let Some(path) = &args.image_path {
        form.select_file(SelectedFile::from_path(path)?);
    }
    print!("{}", render::render_view(&form));

    if let Some(submission) = form.begin_submit() {
        println!();
        print!("{}", render::render_view(&form));
        let outcome = client.predict(submission.file()).await;
        form.finish_submit(outcome);
    }
    println!();
    print!("{}", render::render_view(&form));

    let Some(result) = form.result() else {
        return Ok(ExitCode::FAILURE);
    };
    let pretty = render::pretty_json(result);

    if args.json {
        if let Some(image_path) = &args.image_path {
            let mut path = image_path.clone();
            path.set_extension("json");
            fs::write(&path, &pretty)?;
            log::info!("results saved to {}", path.display());
        }
    }

    if args.clip {
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&pretty) {
                    eprintln!("Failed to copy to clipboard: {}", e);
                }
            }
            Err(e) => eprintln!("Failed to initialize clipboard: {}", e),
        }
    }

    Ok(ExitCode::SUCCESS)
}
