//! Record payload schema and CBOR codec, handler copy.
//!
//! Payload bytes arrive here from untrusted network input, so decoding is
//! built on explicit structural validation: definite-length maps only, text
//! keys and values, bounded size, duplicates rejected. Every failure is a
//! [`DecodeError`] value; decoding never panics.

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

/// A wine label record as stored in ledger state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelRecord {
    pub id: String,
    pub printed_at: String,
    pub longitude: String,
    pub latitude: String,
}

impl LabelRecord {
    /// The empty record written in place of a deleted one. State is never
    /// removed, only overwritten.
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

/// A decoded mutation payload. The verb stays a raw string here; verb
/// validation is the handler's own step, after the id check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelPayload {
    pub verb: String,
    pub record: LabelRecord,
}

/// Errors from payload/record decoding.
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

/// Encode a mutation payload as a five-entry CBOR map. Used by the interop
/// tests and local tooling; the client has its own encoder.
pub fn encode_payload(verb: &str, record: &LabelRecord) -> Result<Vec<u8>, DecodeError> {
    let mut buf = Vec::with_capacity(96);
    let mut e = Encoder::new(&mut buf);
    e.map(5)
        .and_then(|e| e.str(KEY_VERB))
        .and_then(|e| e.str(verb))
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

/// Encode a bare record, the shape the handler writes into state.
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

/// Decode an incoming mutation payload.
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

/// Decode a bare record from prior state. A `verb` key, if present, is
/// ignored.
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
            id: "barolo-2016".into(),
            printed_at: "Piedmont".into(),
            longitude: "7.95".into(),
            latitude: "44.61".into(),
        }
    }

    #[test]
    fn payload_roundtrip() {
        let encoded = encode_payload("set", &record()).unwrap();
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
    fn unknown_verbs_survive_decoding() {
        // Verb validation belongs to the handler, not the codec.
        let encoded = encode_payload("frobnicate", &record()).unwrap();
        assert_eq!(decode_payload(&encoded).unwrap().verb, "frobnicate");
    }

    #[test]
    fn tombstone_roundtrip() {
        let encoded = encode_record(&LabelRecord::tombstone()).unwrap();
        assert!(decode_record(&encoded).unwrap().is_tombstone());
    }

    #[test]
    fn non_map_and_indefinite_map_are_rejected() {
        assert_eq!(decode_payload(&[0x62, b'h', b'i']).unwrap_err(), DecodeError::NotAMap);
        assert_eq!(decode_payload(&[0xbf, 0xff]).unwrap_err(), DecodeError::NotAMap);
    }

    #[test]
    fn duplicate_and_missing_fields_are_rejected() {
        let mut buf = Vec::new();
        let mut e = Encoder::new(&mut buf);
        e.map(2).unwrap();
        e.str("latitude").unwrap();
        e.str("1").unwrap();
        e.str("latitude").unwrap();
        e.str("2").unwrap();
        assert_eq!(
            decode_record(&buf).unwrap_err(),
            DecodeError::DuplicateField("latitude")
        );

        let mut buf = Vec::new();
        let mut e = Encoder::new(&mut buf);
        e.map(0).unwrap();
        assert_eq!(
            decode_record(&buf).unwrap_err(),
            DecodeError::MissingField("id")
        );
    }

    #[test]
    fn integer_value_for_text_field_is_rejected() {
        let mut buf = Vec::new();
        let mut e = Encoder::new(&mut buf);
        e.map(1).unwrap();
        e.str("id").unwrap();
        e.u32(7).unwrap();
        assert!(matches!(
            decode_record(&buf).unwrap_err(),
            DecodeError::Malformed(_)
        ));
    }

    #[test]
    fn oversized_map_claim_is_rejected() {
        // Map header claiming 1000 entries.
        let data = [0xb9, 0x03, 0xe8];
        assert_eq!(
            decode_payload(&data).unwrap_err(),
            DecodeError::TooManyEntries(1000)
        );
    }

    proptest! {
        #[test]
        fn decode_never_panics(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = decode_payload(&data);
            let _ = decode_record(&data);
        }
    }
}
