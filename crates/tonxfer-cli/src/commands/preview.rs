//! `tonxfer preview`: render the readable part of a comment payload.

use clap::Args;
use tonxfer_cell::transport::comment_preview;

use crate::output::{self, Field};
use crate::GlobalOpts;

#[derive(Args)]
pub struct PreviewArgs {
    /// Comment payload as base64 transport text.
    pub text: String,

    /// Start the preview at this marker when present.
    #[arg(long)]
    pub marker: Option<String>,
}

pub fn run(args: PreviewArgs, opts: &GlobalOpts) -> std::result::Result<(), String> {
    let preview = comment_preview(&args.text, args.marker.as_deref());
    output::print_fields(&[Field::new("preview", "Preview", preview)], opts.json);
    Ok(())
}
