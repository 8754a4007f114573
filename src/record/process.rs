use crate::error::RejectReason;

/// Number of logical columns requested from `ps`: pid, user, %cpu, %mem, args.
pub const PROCESS_FIELDS: usize = 5;

/// One row of a process listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRecord {
    /// Kept as text so the listing's own formatting survives.
    pub pid: String,
    pub user: String,
    pub cpu_percent: f64,
    pub mem_percent: f64,
    /// Full command line, may contain whitespace.
    pub command: String,
}

/// Parse one data line of `ps -eo pid,user,%cpu,%mem,args`.
///
/// Expected columns (whitespace-separated, command absorbs the rest):
/// pid  user  %cpu  %mem  command...
///
/// Example:
///     2 alice     75.3  4.2 python app.py
pub fn parse_process_line(line: &str) -> Result<ProcessRecord, RejectReason> {
    let fields = split_fields(line, PROCESS_FIELDS);
    if fields.is_empty() {
        return Err(RejectReason::Empty);
    }
    if fields.len() < PROCESS_FIELDS {
        return Err(RejectReason::TooFewFields {
            expected: PROCESS_FIELDS,
            found: fields.len(),
        });
    }

    let cpu_percent = parse_percent("%CPU", fields[2])?;
    let mem_percent = parse_percent("%MEM", fields[3])?;

    Ok(ProcessRecord {
        pid: fields[0].to_string(),
        user: fields[1].to_string(),
        cpu_percent,
        mem_percent,
        command: fields[4].trim_end().to_string(),
    })
}

fn parse_percent(field: &'static str, value: &str) -> Result<f64, RejectReason> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RejectReason::NonNumeric {
            field,
            value: value.to_string(),
        }),
    }
}

/// Split on runs of whitespace into at most `max` fields; the last one keeps
/// whatever text remains, inner whitespace included.
fn split_fields(line: &str, max: usize) -> Vec<&str> {
    let mut fields = Vec::with_capacity(max);
    let mut rest = line.trim_start();

    while !rest.is_empty() {
        if fields.len() + 1 == max {
            fields.push(rest);
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(end) => {
                fields.push(&rest[..end]);
                rest = rest[end..].trim_start();
            }
            None => {
                fields.push(rest);
                break;
            }
        }
    }

    fields
}
