//! Order signature payload construction.
//!
//! The venue authorizes a trade by personally signing a keccak-256 digest of
//! a fixed 14-field sequence. [`encode`] builds the ordered field list from
//! an [`Order`]; [`hash`] tightly packs the values to their declared widths
//! and hashes the concatenation. Two implementations given the same order
//! must produce byte-identical signing input.

use alloy::primitives::{Address, B256, hex, keccak256};

use crate::{error::EncodeError, types::Order};

/// Byte width of the `uint128` nonce field.
const NONCE_LEN: usize = 16;

/// Typed field of the signing payload.
///
/// The tag vocabulary matches the venue schema exactly; the ordering of the
/// list produced by [`encode`] is significant and fixed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Uint8(u8),
    /// Big-endian byte sequence; must be exactly 16 bytes when hashed.
    Uint128(Vec<u8>),
    Uint64(u64),
    /// Address in hex text form, carried verbatim. No checksum normalization
    /// happens at this layer.
    Address(String),
    Str(String),
    Bool(bool),
}

impl Field {
    /// Schema type tag of the field.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Field::Uint8(_) => "uint8",
            Field::Uint128(_) => "uint128",
            Field::Uint64(_) => "uint64",
            Field::Address(_) => "address",
            Field::Str(_) => "string",
            Field::Bool(_) => "bool",
        }
    }

    /// Appends the tightly-packed byte form of the value to `out`.
    ///
    /// Each value occupies exactly its declared type's width; strings pack as
    /// raw UTF-8 bytes with no length prefix or padding.
    fn pack_into(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        match self {
            Field::Uint8(value) => out.push(*value),
            Field::Uint128(bytes) => {
                if bytes.len() != NONCE_LEN {
                    return Err(EncodeError::Encoding(format!(
                        "uint128 expects {NONCE_LEN} bytes, got {}",
                        bytes.len()
                    )));
                }
                out.extend_from_slice(bytes);
            },
            Field::Uint64(value) => out.extend_from_slice(&value.to_be_bytes()),
            Field::Address(text) => {
                let address: Address = text.parse().map_err(|err| {
                    EncodeError::Encoding(format!("invalid address {text:?}: {err}"))
                })?;
                out.extend_from_slice(address.as_slice());
            },
            Field::Str(text) => out.extend_from_slice(text.as_bytes()),
            Field::Bool(value) => out.push(*value as u8),
        }
        Ok(())
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Uint8(value) => write!(f, "uint8 {value}"),
            Field::Uint128(bytes) => write!(f, "uint128 0x{}", hex::encode(bytes)),
            Field::Uint64(value) => write!(f, "uint64 {value}"),
            Field::Address(text) => write!(f, "address {text}"),
            Field::Str(text) => write!(f, "string {text:?}"),
            Field::Bool(value) => write!(f, "bool {value}"),
        }
    }
}

/// Builds the ordered field list the external signer will hash and sign.
///
/// `side` and `type` are validated on parse but never encoded; the schema
/// bakes in the fixed order-type code instead. Pure function of the input.
pub fn encode(order: &Order) -> Result<Vec<Field>, EncodeError> {
    let nonce = nonce_bytes(&order.nonce)?;
    Ok(vec![
        Field::Uint8(order.r#type.code()),
        Field::Uint128(nonce),
        Field::Address(order.wallet.clone()),
        Field::Str(order.market.clone()),
        Field::Uint8(0),
        Field::Uint8(0),
        Field::Str(order.quantity.clone()),
        Field::Bool(false),
        Field::Str(String::new()),
        Field::Str(String::new()),
        Field::Str(String::new()),
        Field::Uint8(0),
        Field::Uint8(0),
        Field::Uint64(0),
    ])
}

/// Hashes the field list into the 32-byte signing digest.
///
/// Values are tightly packed and keccak-256 hashed, matching
/// `solidityKeccak256` semantics. This is NOT the padded 32-byte-per-field
/// ABI encoding: a `uint8` contributes one byte, an address twenty.
pub fn hash(fields: &[Field]) -> Result<B256, EncodeError> {
    let mut packed = Vec::new();
    for field in fields {
        field.pack_into(&mut packed)?;
    }
    Ok(keccak256(&packed))
}

/// Strips UUID hyphens and hex-decodes the nonce into its big-endian bytes.
fn nonce_bytes(nonce: &str) -> Result<Vec<u8>, EncodeError> {
    let compact: String = nonce.chars().filter(|c| *c != '-').collect();
    let bytes = hex::decode(&compact)
        .map_err(|err| EncodeError::InvalidNonce(format!("{nonce:?}: {err}")))?;
    if bytes.len() != NONCE_LEN {
        return Err(EncodeError::InvalidNonce(format!(
            "{nonce:?}: expected {NONCE_LEN} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(bytes)
}
