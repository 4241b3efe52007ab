use crate::io::error::Error;
use serde::Serialize;
use std::io::Write;

/// Serializes `value` as compact JSON onto `writer` and flushes it.
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<(), Error> {
    serde_json::to_writer(&mut writer, value).map_err(|e| Error::from_io(e.into(), None))?;
    writer.flush().map_err(|e| Error::from_io(e, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::ExtractionBatch;

    #[test]
    fn writes_an_empty_batch() {
        let mut out = Vec::new();
        write_json(&mut out, &ExtractionBatch::new()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["protein"]["coord"], serde_json::json!([]));
        assert_eq!(value["report"]["candidates"], 0);
    }
}
