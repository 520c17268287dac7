use crate::cli::{DecodeArgs, GenerateArgs};
use bizflake::{BizId, Bizflake, BizflakeSettings, BusinessType, Clock, Decoder};
use jiff::tz::TimeZone;
use jiff::Timestamp;
use serde::Serialize;
use std::error::Error;
use std::io::Write;
use tracing::{debug, info};

/// Mints `args.count` ids from a single generator, one per line.
pub fn generate<C: Clock>(
    generator: &Bizflake<C>,
    args: &GenerateArgs,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    info!(
        business_type = %args.business_type,
        count = args.count,
        epoch = %generator.epoch(),
        "generating ids"
    );

    for _ in 0..args.count {
        let id = generator.generate(args.business_type)?;
        if args.hex {
            writeln!(out, "{id:#x}")?;
        } else {
            writeln!(out, "{id}")?;
        }
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct DecodeReport {
    id: BizId,
    hex: String,
    timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    local: Option<String>,
    business_type: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    business_name: Option<&'static str>,
    sequence: u16,
}

pub fn decode(
    decoder: &Decoder,
    args: &DecodeArgs,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let decoded = decoder.decode(args.id);
    let local = match &args.tz {
        Some(name) => {
            let tz = TimeZone::get(name)?;
            Some(decoder.decode_local(args.id, &tz).zoned.to_string())
        }
        None => None,
    };
    debug!(id = %args.id, ?decoded, "decoded id");

    let report = DecodeReport {
        id: args.id,
        hex: format!("{:#018x}", args.id),
        timestamp: decoded.timestamp,
        local,
        business_type: decoded.business_type,
        // unchecked ids may carry tags outside the valid range
        business_name: BusinessType::new(decoded.business_type)
            .ok()
            .and_then(BusinessType::name),
        sequence: decoded.sequence,
    };

    if args.json {
        serde_json::to_writer(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "id             {}", report.id)?;
    writeln!(out, "hex            {}", report.hex)?;
    writeln!(out, "timestamp      {}", report.timestamp)?;
    if let Some(local) = &report.local {
        writeln!(out, "local          {local}")?;
    }
    match report.business_name {
        Some(name) => writeln!(out, "business_type  {} ({name})", report.business_type)?,
        None => writeln!(out, "business_type  {}", report.business_type)?,
    }
    writeln!(out, "sequence       {}", report.sequence)?;

    Ok(())
}

pub fn generator(epoch: Timestamp) -> Bizflake<bizflake::SystemClock> {
    Bizflake::new(BizflakeSettings::builder().epoch(epoch).build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizflake::layout;

    fn decode_to_string(args: DecodeArgs) -> String {
        let mut out = Vec::new();
        decode(&Decoder::default(), &args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn generate_prints_one_id_per_line() {
        let generator = generator(bizflake::DEFAULT_EPOCH);
        let args = GenerateArgs {
            business_type: BusinessType::ORDER,
            count: 3,
            hex: false,
        };
        let mut out = Vec::new();
        generate(&generator, &args, &mut out).unwrap();

        let ids: Vec<BizId> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| line.parse().unwrap())
            .collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(ids.iter().all(|id| id.business_type() == 5));
    }

    #[test]
    fn generate_hex_output_parses_back() {
        let generator = generator(bizflake::DEFAULT_EPOCH);
        let args = GenerateArgs {
            business_type: BusinessType::USER,
            count: 1,
            hex: true,
        };
        let mut out = Vec::new();
        generate(&generator, &args, &mut out).unwrap();

        let line = String::from_utf8(out).unwrap();
        assert!(line.starts_with("0x"));
        let id: BizId = line.trim().parse().unwrap();
        assert_eq!(id.business_type(), 1);
    }

    #[test]
    fn generate_reports_clock_before_epoch() {
        let future = "2999-01-01T00:00:00Z".parse().unwrap();
        let generator = generator(future);
        let args = GenerateArgs {
            business_type: BusinessType::USER,
            count: 1,
            hex: false,
        };
        let err = generate(&generator, &args, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("behind the epoch"));
    }

    #[test]
    fn decode_prints_fields() {
        let output = decode_to_string(DecodeArgs {
            id: BizId::from_raw(layout::pack(1, 1, 0)),
            tz: None,
            json: false,
        });
        assert!(output.contains("timestamp      2023-01-01T00:00:00.001Z"));
        assert!(output.contains("business_type  1 (user)"));
        assert!(output.contains("sequence       0"));
        assert!(!output.contains("local"));
    }

    #[test]
    fn decode_with_time_zone_adds_local_view() {
        let output = decode_to_string(DecodeArgs {
            id: BizId::from_raw(layout::pack(3, 0, 7)),
            tz: Some("UTC".to_string()),
            json: false,
        });
        assert!(output.contains("local          2023-01-01T00:00:00+00:00[UTC]"));
        assert!(output.contains("business_type  3 (account)"));
    }

    #[test]
    fn decode_json_omits_unknown_name() {
        let output = decode_to_string(DecodeArgs {
            id: BizId::from_raw(layout::pack(0, 0, 2)),
            tz: None,
            json: true,
        });
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["id"], 2);
        assert_eq!(value["hex"], "0x0000000000000002");
        assert_eq!(value["timestamp"], "2023-01-01T00:00:00Z");
        assert_eq!(value["business_type"], 0);
        assert_eq!(value["sequence"], 2);
        assert!(value.get("business_name").is_none());
        assert!(value.get("local").is_none());
    }

    #[test]
    fn decode_rejects_unknown_time_zone() {
        let args = DecodeArgs {
            id: BizId::from_raw(1),
            tz: Some("Not/AZone".to_string()),
            json: false,
        };
        assert!(decode(&Decoder::default(), &args, &mut Vec::new()).is_err());
    }
}
