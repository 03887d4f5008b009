//! Time utilities: wall-clock arithmetic in the reference timezone.

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

/// Parse an IANA timezone name like "Asia/Shanghai".
pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Parse a local datetime like "2026-02-20 23:59" in an IANA tz.
pub fn parse_local_datetime(local: &str, tz: &str) -> Result<DateTime<Tz>> {
    let tz = parse_timezone(tz)?;

    let ndt = NaiveDateTime::parse_from_str(local.trim(), "%Y-%m-%d %H:%M")
        .map_err(|e| anyhow::anyhow!("invalid local datetime '{local}': {e}"))?;

    tz.from_local_datetime(&ndt)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time (DST?): {local} {tz}"))
}

/// Place a wall-clock datetime in the timezone of `reference`.
///
/// Ambiguous local times take the earlier instant. Nonexistent ones (DST gaps) are
/// read with the reference's own UTC offset, so this never fails.
pub fn localize<Z: TimeZone>(reference: &DateTime<Z>, local: NaiveDateTime) -> DateTime<Z> {
    let tz = reference.timezone();
    match tz.from_local_datetime(&local).earliest() {
        Some(dt) => dt,
        None => {
            let offset = reference.offset().fix().local_minus_utc();
            tz.from_utc_datetime(&(local - Duration::seconds(i64::from(offset))))
        }
    }
}

/// Colloquial name of the part of day an hour falls in
pub fn period_name(hour: u32) -> &'static str {
    match hour {
        0..=5 => "凌晨",
        6..=8 => "早上",
        9..=11 => "上午",
        12 => "中午",
        13..=17 => "下午",
        18..=19 => "傍晚",
        20..=22 => "晚上",
        _ => "深夜",
    }
}
