//! `tonxfer address`: show the wallet identity.

use crate::output::{self, Field};
use crate::wallet_io;
use crate::GlobalOpts;

pub fn run(opts: &GlobalOpts) -> std::result::Result<(), String> {
    let wallet = wallet_io::open_wallet(opts)?;

    output::print_fields(
        &[
            Field::new("address", "Address", wallet.address().to_string()),
            Field::new(
                "public_key",
                "Public key",
                hex::encode(wallet.public_key().as_bytes()),
            ),
        ],
        opts.json,
    );
    Ok(())
}
