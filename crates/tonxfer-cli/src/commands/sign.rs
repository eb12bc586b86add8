//! `tonxfer sign`: build and sign a transfer.
//!
//! The caller supplies the wallet's current sequence number; it is not
//! fetched from the network.

use clap::Args;
use tonxfer_types::{Address, Nanotons};
use tonxfer_wallet::TransferRequest;

use crate::output::{self, Field};
use crate::wallet_io;
use crate::GlobalOpts;

#[derive(Args)]
pub struct SignArgs {
    /// Destination address (`<workchain>:<64 hex chars>`).
    #[arg(long)]
    pub to: String,

    /// Amount in TON, e.g. `0.25`.
    #[arg(long)]
    pub amount: String,

    /// Comment payload as base64 transport text.
    #[arg(long)]
    pub comment: Option<String>,

    /// Current wallet sequence number.
    #[arg(long)]
    pub seqno: u32,
}

pub fn run(args: SignArgs, opts: &GlobalOpts) -> std::result::Result<(), String> {
    let request = build_request(&args)?;
    let wallet = wallet_io::open_wallet(opts)?;
    let signed = wallet
        .transfer(&request, args.seqno)
        .map_err(|e| e.to_string())?;

    output::print_fields(
        &[
            Field::new("from", "From", wallet.address().to_string()),
            Field::new("to", "To", request.destination.to_string()),
            Field::new("amount", "Amount (TON)", request.amount.to_string()),
            Field::new("seqno", "Seqno", signed.seqno().to_string()),
            Field::new("valid_until", "Valid until", signed.valid_until().to_string()),
            Field::new("content_hash", "Content hash", signed.content_hash().to_string()),
            Field::new("transport_text", "Transport text", signed.transport_text()),
        ],
        opts.json,
    );
    Ok(())
}

fn build_request(args: &SignArgs) -> std::result::Result<TransferRequest, String> {
    let destination: Address = args.to.parse().map_err(|e| format!("--to: {e}"))?;
    let amount = Nanotons::from_ton_str(&args.amount).map_err(|e| format!("--amount: {e}"))?;

    let mut request = TransferRequest::new(destination, amount);
    if let Some(comment) = &args.comment {
        request = request.with_comment(comment.clone());
    }
    Ok(request)
}
