//! Answer text formatting.

use crate::dns::types::{Answer, RecordType};

/// Separator between answers that are listed together.
const SEPARATOR: &str = ", ";

/// Render the answer set as the sensor's result text.
///
/// A and AAAA report only the last address of the answer set, as
/// `"<domain>: <address>"`. Earlier addresses are overwritten, not listed.
/// MX lists every record as `"<preference>: <exchange>"`. NS, CNAME and
/// PTR list the target names; SOA reports `"<mname> <rname> <serial>"`.
/// An empty answer set gives an empty string.
#[must_use]
pub fn format_answers(domain: &str, record_type: RecordType, answers: &[Answer]) -> String {
    match record_type {
        RecordType::A | RecordType::Aaaa => {
            let mut result = String::new();
            for answer in answers {
                if let Answer::Address(addr) = answer {
                    result = format!("{domain}: {addr}");
                }
            }
            result
        }
        RecordType::Mx => join(answers.iter().filter_map(|a| match a {
            Answer::Mail {
                preference,
                exchange,
            } => Some(format!("{preference}: {exchange}")),
            _ => None,
        })),
        RecordType::Ns | RecordType::Cname | RecordType::Ptr => {
            join(answers.iter().filter_map(|a| match a {
                Answer::Name(name) => Some(name.clone()),
                _ => None,
            }))
        }
        RecordType::Soa => join(answers.iter().filter_map(|a| match a {
            Answer::Authority {
                mname,
                rname,
                serial,
            } => Some(format!("{mname} {rname} {serial}")),
            _ => None,
        })),
    }
}

fn join(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(SEPARATOR)
}
