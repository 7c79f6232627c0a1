//! # Point Module
//!
//! Số học cho Point Ledger: chia đều một khoản điểm cho nhiều người nhận
//! (phần dư dồn cho những người đầu danh sách) và các hàm parse định dạng
//! mà mobile client gửi lên (`"2_3_4"`, `"123-0123456789"`, `"50000-30000"`).

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Số điểm cộng cho mỗi câu trả lời đúng trong quiz.
pub const POINTS_PER_CORRECT_ANSWER: i64 = 10;

/// Phần chia của một người nhận trong split transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub receiver_id: i64,
    pub amount: i64,
}

/// Chia `total` cho danh sách người nhận theo thứ tự đầu vào.
///
/// `per = total / n`, `rem = total % n`; `rem` người đầu tiên nhận `per + 1`,
/// còn lại nhận `per`. Tổng các phần luôn bằng `total`.
///
/// # Errors
/// - `InvalidAmount` nếu danh sách rỗng, `total` không dương,
///   hoặc phần chia mỗi người bằng 0.
pub fn split_shares(receiver_ids: &[i64], total: i64) -> CoreResult<Vec<Share>> {
    if receiver_ids.is_empty() {
        return Err(CoreError::InvalidAmount(
            "receiver list is empty".to_string(),
        ));
    }
    if total <= 0 {
        return Err(CoreError::InvalidAmount(format!(
            "total must be positive: {}",
            total
        )));
    }

    let count = receiver_ids.len() as i64;
    let per_receiver = total / count;
    let remainder = total % count;

    if per_receiver == 0 {
        return Err(CoreError::InvalidAmount(format!(
            "total {} too small to split among {} receivers",
            total, count
        )));
    }

    let shares = receiver_ids
        .iter()
        .enumerate()
        .map(|(idx, &receiver_id)| Share {
            receiver_id,
            amount: per_receiver + if (idx as i64) < remainder { 1 } else { 0 },
        })
        .collect();

    Ok(shares)
}

/// Parse danh sách id người nhận dạng `"2_3_4"`.
///
/// Phần tử không phải số bị bỏ qua, giống hành vi client cũ.
pub fn parse_receiver_list(raw: &str) -> Vec<i64> {
    raw.split('_')
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .filter(|id| *id >= 0)
        .collect()
}

/// Parse người nhận dạng `"id-cccd"` (ví dụ `"123-0123456789"`).
pub fn parse_receiver_cccd(raw: &str) -> CoreResult<(i64, String)> {
    let (id_part, cccd) = raw
        .split_once('-')
        .ok_or_else(|| CoreError::InvalidIdFormat(raw.to_string()))?;

    let receiver_id = id_part
        .trim()
        .parse::<i64>()
        .map_err(|_| CoreError::InvalidIdFormat(raw.to_string()))?;

    Ok((receiver_id, cccd.trim().to_string()))
}

/// Parse danh sách tổng tiền theo từng người bán dạng `"50000-30000"`.
pub fn parse_total_list(raw: &str) -> Vec<i64> {
    raw.split('-')
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .filter(|t| *t >= 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_even_remainder_to_front() {
        let shares = split_shares(&[1, 2, 3], 100).unwrap();
        assert_eq!(
            shares,
            vec![
                Share {
                    receiver_id: 1,
                    amount: 34
                },
                Share {
                    receiver_id: 2,
                    amount: 33
                },
                Share {
                    receiver_id: 3,
                    amount: 33
                },
            ]
        );
        assert_eq!(shares.iter().map(|s| s.amount).sum::<i64>(), 100);
    }

    #[test]
    fn test_split_single_receiver_minimum() {
        let shares = split_shares(&[7], 1).unwrap();
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].amount, 1);
    }

    #[test]
    fn test_split_rejects_empty_and_unsplittable() {
        assert!(matches!(
            split_shares(&[], 100),
            Err(CoreError::InvalidAmount(_))
        ));
        // 1 điểm chia 2 người: mỗi người 0 điểm
        assert!(matches!(
            split_shares(&[1, 2], 1),
            Err(CoreError::InvalidAmount(_))
        ));
        assert!(matches!(
            split_shares(&[1], 0),
            Err(CoreError::InvalidAmount(_))
        ));
        assert!(matches!(
            split_shares(&[1], -10),
            Err(CoreError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_split_sum_always_equals_total() {
        for total in [5, 17, 99, 1000] {
            for n in 1..=5usize {
                let ids: Vec<i64> = (1..=n as i64).collect();
                if let Ok(shares) = split_shares(&ids, total) {
                    assert_eq!(shares.iter().map(|s| s.amount).sum::<i64>(), total);
                }
            }
        }
    }

    #[test]
    fn test_parse_receiver_list() {
        assert_eq!(parse_receiver_list("2_3_4"), vec![2, 3, 4]);
        assert_eq!(parse_receiver_list("2_x_4"), vec![2, 4]);
        assert_eq!(parse_receiver_list(""), Vec::<i64>::new());
        assert_eq!(parse_receiver_list(" 7 "), vec![7]);
    }

    #[test]
    fn test_parse_receiver_cccd() {
        let (id, cccd) = parse_receiver_cccd("123-0123456789").unwrap();
        assert_eq!(id, 123);
        assert_eq!(cccd, "0123456789");

        assert!(parse_receiver_cccd("123").is_err());
        assert!(parse_receiver_cccd("abc-0123").is_err());
    }

    #[test]
    fn test_parse_total_list() {
        assert_eq!(parse_total_list("50000-30000"), vec![50000, 30000]);
        assert_eq!(parse_total_list("50000"), vec![50000]);
        assert_eq!(parse_total_list("x-30000"), vec![30000]);
    }
}
