//! Fixed demo data served when the session is in demo mode.

use crate::models::{Contract, Line};

pub fn contracts() -> Vec<Contract> {
    vec![
        Contract {
            contract_number: "204368924".to_string(),
            status: "ACTIVE".to_string(),
            end_date: Some("2025-12-31".to_string()),
            bill_to_name: Some("ACME Corp".to_string()),
            service_level: Some("SNT".to_string()),
            contract_type: Some("Service".to_string()),
        },
        Contract {
            contract_number: "987654321".to_string(),
            status: "EXPIRED".to_string(),
            end_date: Some("2023-01-15".to_string()),
            bill_to_name: Some("ACME Corp".to_string()),
            service_level: Some("SNTP".to_string()),
            contract_type: Some("Software".to_string()),
        },
    ]
}

pub fn lines() -> Vec<Line> {
    vec![
        Line {
            serial_number: "FOC12345678".to_string(),
            product_number: "C9300-24T-A".to_string(),
            description: "Catalyst 9300 24-port Data Only, Network Advantage".to_string(),
            contract_number: "204368924".to_string(),
            status: "COVERED".to_string(),
            coverage_end_date: "2025-12-31".to_string(),
        },
        Line {
            serial_number: "FOC87654321".to_string(),
            product_number: "C9200-48P-E".to_string(),
            description: "Catalyst 9200 48-port PoE+, Network Essentials".to_string(),
            contract_number: "204368924".to_string(),
            status: "COVERED".to_string(),
            coverage_end_date: "2025-12-31".to_string(),
        },
    ]
}
