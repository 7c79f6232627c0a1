//! Payment commands: build signed URLs, verify callbacks

use anyhow::Result;
use bookswap_business::PaymentService;
use bookswap_payment::{VnpayConfig, RESPONSE_CODE_SUCCESS};

use crate::PaymentAction;

pub fn handle(action: PaymentAction) -> Result<()> {
    match action {
        PaymentAction::CreateUrl {
            txn_ref,
            amount,
            tmn_code,
            secret,
            return_url,
            ip,
        } => {
            let config = VnpayConfig::sandbox(&tmn_code, &secret, &return_url);
            let service = PaymentService::new(config);
            let url = service.create_payment_url(&txn_ref, amount, &ip)?;
            println!("{url}");
        }

        PaymentAction::Verify { query, secret } => {
            let pairs = parse_query(&query);
            let refs: Vec<(&str, &str)> = pairs
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();

            let config = VnpayConfig::sandbox("", &secret, "");
            let service = PaymentService::new(config);
            match service.process_return(refs).response_code() {
                Ok(response_code) => {
                    println!("✅ Signature valid");
                    if response_code == RESPONSE_CODE_SUCCESS {
                        println!("   Payment successful (code {response_code})");
                    } else {
                        println!("   Payment not successful (code {response_code})");
                    }
                }
                Err(_) => {
                    println!("❌ Signature invalid");
                }
            }
        }
    }

    Ok(())
}

/// Tách query string `a=1&b=2` thành các cặp key/value đã decode.
fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (
                key.to_string(),
                urlencoding::decode(value)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| value.to_string()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query() {
        let pairs = parse_query("?vnp_Amount=10000000&vnp_TxnRef=ORDER%20123&flag");
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], ("vnp_Amount".to_string(), "10000000".to_string()));
        assert_eq!(pairs[1].1, "ORDER 123");
        assert_eq!(pairs[2], ("flag".to_string(), String::new()));
    }
}
