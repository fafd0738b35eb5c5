//! Record payload schema and CBOR codec, client copy.
//!
//! Payloads are definite-length CBOR maps keyed by field name so the schema
//! can evolve without touching addressing or signing. Decoding validates the
//! structure explicitly — no catch-all recovery — and never panics on
//! arbitrary input.

use minicbor::{Decoder, Encoder};

/// Upper bound on accepted payload bytes.
pub const MAX_PAYLOAD_LEN: usize = 4096;

/// Upper bound on map entries; the schema needs five.
const MAX_MAP_ENTRIES: u64 = 16;

const KEY_VERB: &str = "verb";
const KEY_ID: &str = "id";
const KEY_PRINTED_AT: &str = "printed_at";
const KEY_LONGITUDE: &str = "longitude";
const KEY_LATITUDE: &str = "latitude";

/// Mutation kind carried in a transaction payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    Set,
    Delete,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A wine label record. Identity is `id`; the rest is mutable payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelRecord {
    pub id: String,
    pub printed_at: String,
    pub longitude: String,
    pub latitude: String,
}

impl LabelRecord {
    /// The empty record written in place of a deleted one.
    pub fn tombstone() -> Self {
        Self::default()
    }

    pub fn is_tombstone(&self) -> bool {
        self.id.is_empty()
            && self.printed_at.is_empty()
            && self.longitude.is_empty()
            && self.latitude.is_empty()
    }
}

/// A decoded mutation payload. The verb is kept as the raw string so the
/// handler can validate it as its own step, after the id check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelPayload {
    pub verb: String,
    pub record: LabelRecord,
}

/// Errors from payload/record decoding. Driven by untrusted network input on
/// the handler side, so every failure is a value, never a panic.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("payload is empty")]
    Empty,

    #[error("payload of {0} bytes exceeds limit")]
    TooLarge(usize),

    #[error("payload is not a definite-length map")]
    NotAMap,

    #[error("payload map claims {0} entries")]
    TooManyEntries(u64),

    #[error("malformed cbor: {0}")]
    Malformed(String),

    #[error("duplicate field: {0}")]
    DuplicateField(&'static str),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("trailing bytes after payload map")]
    TrailingBytes,
}

/// Encode a mutation payload as a five-entry CBOR map.
pub fn encode_payload(verb: Verb, record: &LabelRecord) -> Result<Vec<u8>, DecodeError> {
    let mut buf = Vec::with_capacity(96);
    let mut e = Encoder::new(&mut buf);
    e.map(5)
        .and_then(|e| e.str(KEY_VERB))
        .and_then(|e| e.str(verb.as_str()))
        .and_then(|e| e.str(KEY_ID))
        .and_then(|e| e.str(&record.id))
        .and_then(|e| e.str(KEY_PRINTED_AT))
        .and_then(|e| e.str(&record.printed_at))
        .and_then(|e| e.str(KEY_LONGITUDE))
        .and_then(|e| e.str(&record.longitude))
        .and_then(|e| e.str(KEY_LATITUDE))
        .and_then(|e| e.str(&record.latitude))
        .map_err(|e| DecodeError::Malformed(e.to_string()))?;
    Ok(buf)
}

/// Encode a bare record (the shape stored in ledger state) as a four-entry
/// CBOR map.
pub fn encode_record(record: &LabelRecord) -> Result<Vec<u8>, DecodeError> {
    let mut buf = Vec::with_capacity(80);
    let mut e = Encoder::new(&mut buf);
    e.map(4)
        .and_then(|e| e.str(KEY_ID))
        .and_then(|e| e.str(&record.id))
        .and_then(|e| e.str(KEY_PRINTED_AT))
        .and_then(|e| e.str(&record.printed_at))
        .and_then(|e| e.str(KEY_LONGITUDE))
        .and_then(|e| e.str(&record.longitude))
        .and_then(|e| e.str(KEY_LATITUDE))
        .and_then(|e| e.str(&record.latitude))
        .map_err(|e| DecodeError::Malformed(e.to_string()))?;
    Ok(buf)
}

/// Decode a mutation payload.
pub fn decode_payload(data: &[u8]) -> Result<LabelPayload, DecodeError> {
    let mut fields = FieldSlots::default();
    read_map(data, &mut fields)?;
    let verb = fields
        .verb
        .take()
        .ok_or(DecodeError::MissingField(KEY_VERB))?;
    Ok(LabelPayload {
        verb,
        record: fields.into_record()?,
    })
}

/// Decode a bare record read back from ledger state. A `verb` key, if
/// present, is ignored.
pub fn decode_record(data: &[u8]) -> Result<LabelRecord, DecodeError> {
    let mut fields = FieldSlots::default();
    read_map(data, &mut fields)?;
    fields.into_record()
}

#[derive(Default)]
struct FieldSlots {
    verb: Option<String>,
    id: Option<String>,
    printed_at: Option<String>,
    longitude: Option<String>,
    latitude: Option<String>,
}

impl FieldSlots {
    fn into_record(self) -> Result<LabelRecord, DecodeError> {
        Ok(LabelRecord {
            id: self.id.ok_or(DecodeError::MissingField(KEY_ID))?,
            printed_at: self
                .printed_at
                .ok_or(DecodeError::MissingField(KEY_PRINTED_AT))?,
            longitude: self
                .longitude
                .ok_or(DecodeError::MissingField(KEY_LONGITUDE))?,
            latitude: self
                .latitude
                .ok_or(DecodeError::MissingField(KEY_LATITUDE))?,
        })
    }
}

fn read_map(data: &[u8], fields: &mut FieldSlots) -> Result<(), DecodeError> {
    if data.is_empty() {
        return Err(DecodeError::Empty);
    }
    if data.len() > MAX_PAYLOAD_LEN {
        return Err(DecodeError::TooLarge(data.len()));
    }

    let mut dec = Decoder::new(data);
    let len = dec
        .map()
        .map_err(malformed)?
        .ok_or(DecodeError::NotAMap)?;
    if len > MAX_MAP_ENTRIES {
        return Err(DecodeError::TooManyEntries(len));
    }

    for _ in 0..len {
        let key = dec.str().map_err(malformed)?;
        match key {
            KEY_VERB => fill(&mut fields.verb, KEY_VERB, &mut dec)?,
            KEY_ID => fill(&mut fields.id, KEY_ID, &mut dec)?,
            KEY_PRINTED_AT => fill(&mut fields.printed_at, KEY_PRINTED_AT, &mut dec)?,
            KEY_LONGITUDE => fill(&mut fields.longitude, KEY_LONGITUDE, &mut dec)?,
            KEY_LATITUDE => fill(&mut fields.latitude, KEY_LATITUDE, &mut dec)?,
            _ => {
                dec.skip().map_err(malformed)?;
            }
        }
    }

    if dec.position() != data.len() {
        return Err(DecodeError::TrailingBytes);
    }
    Ok(())
}

fn fill(
    slot: &mut Option<String>,
    field: &'static str,
    dec: &mut Decoder<'_>,
) -> Result<(), DecodeError> {
    let value = dec.str().map_err(malformed)?;
    if slot.replace(value.to_string()).is_some() {
        return Err(DecodeError::DuplicateField(field));
    }
    Ok(())
}

fn malformed(e: minicbor::decode::Error) -> DecodeError {
    DecodeError::Malformed(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record() -> LabelRecord {
        LabelRecord {
            id: "abc".into(),
            printed_at: "Napa".into(),
            longitude: "-122.27".into(),
            latitude: "38.57".into(),
        }
    }

    #[test]
    fn payload_roundtrip() {
        let encoded = encode_payload(Verb::Set, &record()).unwrap();
        let decoded = decode_payload(&encoded).unwrap();
        assert_eq!(decoded.verb, "set");
        assert_eq!(decoded.record, record());
    }

    #[test]
    fn record_roundtrip() {
        let encoded = encode_record(&record()).unwrap();
        assert_eq!(decode_record(&encoded).unwrap(), record());
    }

    #[test]
    fn record_decode_ignores_verb_key() {
        let encoded = encode_payload(Verb::Delete, &record()).unwrap();
        assert_eq!(decode_record(&encoded).unwrap(), record());
    }

    #[test]
    fn tombstone_roundtrip() {
        let encoded = encode_record(&LabelRecord::tombstone()).unwrap();
        let decoded = decode_record(&encoded).unwrap();
        assert!(decoded.is_tombstone());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(decode_payload(&[]).unwrap_err(), DecodeError::Empty);
    }

    #[test]
    fn non_map_input_is_rejected() {
        // CBOR text string "hi"
        let data = [0x62, b'h', b'i'];
        assert_eq!(decode_payload(&data).unwrap_err(), DecodeError::NotAMap);
    }

    #[test]
    fn indefinite_map_is_rejected() {
        // 0xbf opens an indefinite-length map
        let data = [0xbf, 0xff];
        assert_eq!(decode_payload(&data).unwrap_err(), DecodeError::NotAMap);
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let mut buf = Vec::new();
        let mut e = Encoder::new(&mut buf);
        e.map(2).unwrap();
        e.str("id").unwrap();
        e.str("a").unwrap();
        e.str("id").unwrap();
        e.str("b").unwrap();
        assert_eq!(
            decode_record(&buf).unwrap_err(),
            DecodeError::DuplicateField("id")
        );
    }

    #[test]
    fn missing_field_is_rejected() {
        let mut buf = Vec::new();
        let mut e = Encoder::new(&mut buf);
        e.map(1).unwrap();
        e.str("id").unwrap();
        e.str("abc").unwrap();
        assert_eq!(
            decode_record(&buf).unwrap_err(),
            DecodeError::MissingField("printed_at")
        );
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut encoded = encode_record(&record()).unwrap();
        encoded.push(0x00);
        assert_eq!(
            decode_record(&encoded).unwrap_err(),
            DecodeError::TrailingBytes
        );
    }

    #[test]
    fn unknown_keys_are_skipped() {
        let mut buf = Vec::new();
        let mut e = Encoder::new(&mut buf);
        e.map(5).unwrap();
        e.str("vintage").unwrap();
        e.u32(2019).unwrap();
        e.str("id").unwrap();
        e.str("abc").unwrap();
        e.str("printed_at").unwrap();
        e.str("Napa").unwrap();
        e.str("longitude").unwrap();
        e.str("-122.27").unwrap();
        e.str("latitude").unwrap();
        e.str("38.57").unwrap();
        assert_eq!(decode_record(&buf).unwrap(), record());
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let data = vec![0u8; MAX_PAYLOAD_LEN + 1];
        assert_eq!(
            decode_payload(&data).unwrap_err(),
            DecodeError::TooLarge(MAX_PAYLOAD_LEN + 1)
        );
    }

    proptest! {
        #[test]
        fn roundtrip_holds_for_any_record(
            id in ".{0,40}",
            printed_at in ".{0,40}",
            longitude in ".{0,20}",
            latitude in ".{0,20}",
        ) {
            let r = LabelRecord { id, printed_at, longitude, latitude };
            let encoded = encode_record(&r).unwrap();
            prop_assert_eq!(decode_record(&encoded).unwrap(), r);
        }

        #[test]
        fn decode_never_panics(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = decode_payload(&data);
            let _ = decode_record(&data);
        }
    }
}
