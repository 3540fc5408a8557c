use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::core::connection::SolConnection;
use crate::error::{RentalSdkError, Result};
use crate::types::UnsignedTransaction;

/// Wrap one instruction into an unsigned message paid for by `fee_payer`.
///
/// The blockhash is fetched here, immediately before serialization.
pub async fn compose_unsigned<C: SolConnection + ?Sized>(
    connection: &C,
    instruction: Instruction,
    fee_payer: &Pubkey,
) -> Result<UnsignedTransaction> {
    let recent_blockhash = connection
        .get_latest_blockhash()
        .await
        .map_err(|e| RentalSdkError::Connection(e.to_string()))?;

    let message = Message::new_with_blockhash(&[instruction], Some(fee_payer), &recent_blockhash);
    debug!(
        %fee_payer,
        %recent_blockhash,
        accounts = message.account_keys.len(),
        "composed unsigned message"
    );

    Ok(UnsignedTransaction {
        message: STANDARD.encode(message.serialize()),
        fee_payer: *fee_payer,
        recent_blockhash,
    })
}

/// Parse a message produced by [`compose_unsigned`].
pub fn decode_message(encoded: &str) -> Result<Message> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| RentalSdkError::InvalidArgument(format!("invalid base64 message: {}", e)))?;
    bincode::deserialize(&bytes)
        .map_err(|e| RentalSdkError::InvalidArgument(format!("invalid message bytes: {}", e)))
}
