// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use chrono::{DateTime, Utc};

/// How long ago `created` was, as shown in listings: "just now",
/// "3 hours ago", "1 week ago" and so on.
///
/// Months are 30 days and years 365 days. Times in the future read as
/// "just now".
pub fn format_age(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - created).num_hours();
    if hours < 1 {
        return "just now".to_owned();
    }
    if hours < 24 {
        return ago(hours, "hour");
    }
    let days = hours / 24;
    if days < 7 {
        return ago(days, "day");
    }
    let weeks = days / 7;
    if weeks < 4 {
        return ago(weeks, "week");
    }
    let months = days / 30;
    if months < 12 {
        return ago(months.max(1), "month");
    }
    ago((days / 365).max(1), "year")
}

fn ago(count: i64, unit: &str) -> String {
    let plural = if count > 1 { "s" } else { "" };
    format!("{count} {unit}{plural} ago")
}
