use anchor_lang::prelude::*;
use solana_sdk_ids::ed25519_program;
use anchor_lang::solana_program::sysvar::instructions::{
    load_current_index_checked, load_instruction_at_checked,
};
use crate::constants::DELEGATION_MESSAGE_PREFIX;
use crate::errors::BetError;

// Layout of the native Ed25519 program instruction data.
const SIGNATURE_OFFSETS_START: usize = 2;
const SIGNATURE_OFFSETS_SERIALIZED_SIZE: usize = 14;
const PUBKEY_SERIALIZED_SIZE: usize = 32;
const SIGNATURE_SERIALIZED_SIZE: usize = 64;
/// Offset instruction index meaning "data lives in this same instruction".
const CURRENT_INSTRUCTION: u16 = u16::MAX;

pub fn delegation_message(authority: &Pubkey, nonce: u64) -> String {
    format!("{}:{}:{}", DELEGATION_MESSAGE_PREFIX, authority, nonce)
}

/// Checks the signed intent against the expected `PREFIX:<authority>:<nonce>` text.
/// A well-formed message for this authority with another nonce is a replay attempt.
pub fn check_delegation_message(message: &[u8], authority: &Pubkey, nonce: u64) -> Result<()> {
    if message == delegation_message(authority, nonce).as_bytes() {
        return Ok(());
    }

    let prefix = format!("{}:{}:", DELEGATION_MESSAGE_PREFIX, authority);
    let claimed_nonce = message
        .strip_prefix(prefix.as_bytes())
        .and_then(|rest| std::str::from_utf8(rest).ok())
        .and_then(|rest| {
            // Only the canonical decimal form counts as a nonce claim.
            let parsed = rest.parse::<u64>().ok()?;
            (parsed.to_string() == rest).then_some(parsed)
        });

    match claimed_nonce {
        Some(claimed) if claimed != nonce => err!(BetError::NonceMismatch),
        _ => err!(BetError::InvalidSignature),
    }
}

/// Requires the instruction right before the current one to be an Ed25519 verify
/// of exactly `signature` by `signer` over `message`.
pub fn verify_preceding_ed25519(
    instructions_sysvar: &AccountInfo,
    signer: &Pubkey,
    message: &[u8],
    signature: &[u8; 64],
) -> Result<()> {
    let current_index = load_current_index_checked(instructions_sysvar)? as usize;
    require!(current_index > 0, BetError::InvalidSignature);

    let ed25519_ix = load_instruction_at_checked(current_index - 1, instructions_sysvar)?;
    require_keys_eq!(ed25519_ix.program_id, ed25519_program::ID, BetError::InvalidSignature);

    verify_ed25519_ix_data(&ed25519_ix.data, signer, message, signature)
}

pub fn verify_ed25519_ix_data(
    data: &[u8],
    signer: &Pubkey,
    message: &[u8],
    signature: &[u8; 64],
) -> Result<()> {
    require!(
        data.len() >= SIGNATURE_OFFSETS_START + SIGNATURE_OFFSETS_SERIALIZED_SIZE,
        BetError::InvalidSignature
    );
    // One signature per verify instruction.
    require!(data[0] == 1, BetError::InvalidSignature);

    let offsets = &data[SIGNATURE_OFFSETS_START..SIGNATURE_OFFSETS_START + SIGNATURE_OFFSETS_SERIALIZED_SIZE];
    let read_u16 = |at: usize| u16::from_le_bytes([offsets[at], offsets[at + 1]]);

    let signature_offset = read_u16(0) as usize;
    let signature_ix_index = read_u16(2);
    let pubkey_offset = read_u16(4) as usize;
    let pubkey_ix_index = read_u16(6);
    let message_offset = read_u16(8) as usize;
    let message_size = read_u16(10) as usize;
    let message_ix_index = read_u16(12);

    require!(
        signature_ix_index == CURRENT_INSTRUCTION
            && pubkey_ix_index == CURRENT_INSTRUCTION
            && message_ix_index == CURRENT_INSTRUCTION,
        BetError::InvalidSignature
    );

    let signed_pubkey = slice_at(data, pubkey_offset, PUBKEY_SERIALIZED_SIZE)?;
    let signed_signature = slice_at(data, signature_offset, SIGNATURE_SERIALIZED_SIZE)?;
    let signed_message = slice_at(data, message_offset, message_size)?;

    require!(signed_pubkey == &signer.to_bytes()[..], BetError::InvalidSignature);
    require!(signed_signature == &signature[..], BetError::InvalidSignature);
    require!(signed_message == message, BetError::InvalidSignature);

    Ok(())
}

fn slice_at(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or_else(|| error!(BetError::InvalidSignature))
}
