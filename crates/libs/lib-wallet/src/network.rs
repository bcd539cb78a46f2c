//! # Network Registry
//!
//! Static mapping from wallet chain identifiers to display names.

/// A network the storefront knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkDescriptor {
    /// Hex chain id as reported by the provider (`"0x89"`)
    pub chain_id: &'static str,
    /// Same id as a number
    pub chain_number: u64,
    pub display_name: &'static str,
}

pub const NETWORKS: &[NetworkDescriptor] = &[
    NetworkDescriptor {
        chain_id: "0x1",
        chain_number: 1,
        display_name: "Ethereum Mainnet",
    },
    NetworkDescriptor {
        chain_id: "0x89",
        chain_number: 137,
        display_name: "Polygon Mainnet",
    },
    NetworkDescriptor {
        chain_id: "0x38",
        chain_number: 56,
        display_name: "BSC Mainnet",
    },
    NetworkDescriptor {
        chain_id: "0x5",
        chain_number: 5,
        display_name: "Goerli Testnet",
    },
    NetworkDescriptor {
        chain_id: "0x13881",
        chain_number: 80001,
        display_name: "Mumbai Testnet",
    },
];

/// All registered networks, in display order.
pub fn all() -> &'static [NetworkDescriptor] {
    NETWORKS
}

/// Find the descriptor for a chain id. Hex digits match case-insensitively.
pub fn lookup(chain_id: &str) -> Option<&'static NetworkDescriptor> {
    NETWORKS
        .iter()
        .find(|network| network.chain_id.eq_ignore_ascii_case(chain_id.trim()))
}

/// Display name for a chain id, or `"Unknown Network (<id>)"`.
pub fn name_for(chain_id: &str) -> String {
    match lookup(chain_id) {
        Some(network) => network.display_name.to_string(),
        None => format!("Unknown Network ({})", chain_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_networks() {
        assert_eq!(name_for("0x1"), "Ethereum Mainnet");
        assert_eq!(name_for("0x89"), "Polygon Mainnet");
        assert_eq!(name_for("0x38"), "BSC Mainnet");
        assert_eq!(name_for("0x5"), "Goerli Testnet");
        assert_eq!(name_for("0x13881"), "Mumbai Testnet");
    }

    #[test]
    fn test_unknown_network_embeds_raw_id() {
        assert_eq!(name_for("0xa4b1"), "Unknown Network (0xa4b1)");
        assert_eq!(name_for(""), "Unknown Network ()");
    }

    #[test]
    fn test_lookup_ignores_hex_case() {
        let network = lookup("0X13881").unwrap();
        assert_eq!(network.chain_number, 80001);
    }

    #[test]
    fn test_chain_numbers_match_hex_ids() {
        for network in all() {
            let digits = network.chain_id.trim_start_matches("0x");
            assert_eq!(u64::from_str_radix(digits, 16).unwrap(), network.chain_number);
        }
    }
}
