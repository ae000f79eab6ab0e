//! 预约状态机
//!
//! 状态流转全部集中在这里，服务层只负责取出预约、调用 `apply`、
//! 把结果写回存储。表中未列出的 (状态, 事件) 组合一律拒绝，
//! 不存在被悄悄吞掉的转移。

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::models::users::entities::TeachingMode;

// 预约状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/booking.ts")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Ongoing,
    PaymentPending,
    Completed,
    Rated,
    Cancelled,
}

impl BookingStatus {
    /// 终态：不允许任何后续转移
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Rated)
    }
}

impl<'de> Deserialize<'de> for BookingStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的预约状态: '{s}'. 支持的状态: pending, confirmed, ongoing, paymentPending, completed, rated, cancelled"
            ))
        })
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Ongoing => "ongoing",
            BookingStatus::PaymentPending => "paymentPending",
            BookingStatus::Completed => "completed",
            BookingStatus::Rated => "rated",
            BookingStatus::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "ongoing" => Ok(BookingStatus::Ongoing),
            "paymentPending" => Ok(BookingStatus::PaymentPending),
            "completed" => Ok(BookingStatus::Completed),
            "rated" => Ok(BookingStatus::Rated),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Invalid booking status: {s}")),
        }
    }
}

// 支付状态（仅对 teaching_mode = physical 的预约有业务含义，
// 线上预约由支付回调直接驱动）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/booking.ts")]
pub enum PaymentState {
    Pending,
    Completed,
}

impl<'de> Deserialize<'de> for PaymentState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的支付状态: '{s}'. 支持的状态: pending, completed"
            ))
        })
    }
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentState::Pending => write!(f, "pending"),
            PaymentState::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for PaymentState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentState::Pending),
            "completed" => Ok(PaymentState::Completed),
            _ => Err(format!("Invalid payment state: {s}")),
        }
    }
}

/// 预约事件
#[derive(Debug, Clone, PartialEq)]
pub enum BookingEvent<'a> {
    /// 家教接受预约请求
    TutorConfirm,
    /// 家教或学生取消，必须给出原因
    Cancel { reason: &'a str },
    /// 学生发起线上支付
    InitiatePayment,
    /// 支付网关回调确认
    PaymentConfirmed,
    /// 家教登记线下收款，状态本身不变
    MarkPhysicalPaid,
    /// 学生评价（1-5 整数，一次为限）
    SubmitRating { stars: i32 },
    /// 预约期满（后台扫描触发的系统事件）
    TermElapsed,
}

impl BookingEvent<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            BookingEvent::TutorConfirm => "tutorConfirm",
            BookingEvent::Cancel { .. } => "cancel",
            BookingEvent::InitiatePayment => "initiatePayment",
            BookingEvent::PaymentConfirmed => "paymentConfirmed",
            BookingEvent::MarkPhysicalPaid => "markPhysicalPaid",
            BookingEvent::SubmitRating { .. } => "submitRating",
            BookingEvent::TermElapsed => "termElapsed",
        }
    }
}

/// 状态机转移错误
#[derive(Debug, Clone, PartialEq)]
pub enum BookingTransitionError {
    InvalidTransition {
        from: BookingStatus,
        event: &'static str,
    },
    ReasonRequired,
    AlreadyRated,
    InvalidRating { stars: i32 },
}

impl fmt::Display for BookingTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingTransitionError::InvalidTransition { from, event } => {
                write!(f, "Event '{event}' is not allowed in status '{from}'")
            }
            BookingTransitionError::ReasonRequired => {
                write!(f, "A cancellation reason is required")
            }
            BookingTransitionError::AlreadyRated => {
                write!(f, "This booking has already been rated")
            }
            BookingTransitionError::InvalidRating { stars } => {
                write!(f, "Rating must be an integer between 1 and 5, got {stars}")
            }
        }
    }
}

impl std::error::Error for BookingTransitionError {}

/// 一次成功转移的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookingTransition {
    pub status: BookingStatus,
    /// 本次转移顺带更新的支付状态（None 表示不变）
    pub payment_state: Option<PaymentState>,
}

impl BookingTransition {
    fn to(status: BookingStatus) -> Self {
        Self {
            status,
            payment_state: None,
        }
    }

    fn paid(status: BookingStatus) -> Self {
        Self {
            status,
            payment_state: Some(PaymentState::Completed),
        }
    }
}

impl BookingStatus {
    /// 应用一个事件，返回新状态或拒绝原因
    ///
    /// 守卫：取消必须带非空原因；支付发起要求线上授课；
    /// 线下收款登记要求线下授课且不改变状态；评价要求 [1,5] 整数
    /// 且一次为限。其余组合一律 `InvalidTransition`。
    pub fn apply(
        self,
        mode: TeachingMode,
        event: &BookingEvent<'_>,
    ) -> Result<BookingTransition, BookingTransitionError> {
        use BookingEvent as E;
        use BookingStatus as S;

        // 评价过的预约重复评价给出专门的错误
        if self == S::Rated {
            if let E::SubmitRating { .. } = event {
                return Err(BookingTransitionError::AlreadyRated);
            }
        }

        match (self, event) {
            // 家教确认：线下直接开课，线上等待支付流程
            (S::Pending, E::TutorConfirm) => match mode {
                TeachingMode::Physical => Ok(BookingTransition::to(S::Ongoing)),
                TeachingMode::Online => Ok(BookingTransition::to(S::Confirmed)),
            },

            // 取消：pending/confirmed/ongoing 三态允许，原因必填
            (S::Pending | S::Confirmed | S::Ongoing, E::Cancel { reason }) => {
                if reason.trim().is_empty() {
                    Err(BookingTransitionError::ReasonRequired)
                } else {
                    Ok(BookingTransition::to(S::Cancelled))
                }
            }

            // 线上支付发起：confirmed 与 ongoing 等价对待
            (S::Confirmed | S::Ongoing, E::InitiatePayment) => match mode {
                TeachingMode::Online => Ok(BookingTransition::to(S::PaymentPending)),
                TeachingMode::Physical => Err(BookingTransitionError::InvalidTransition {
                    from: self,
                    event: event.name(),
                }),
            },

            // 支付确认后回到 ongoing，预约期满才进入 completed
            (S::PaymentPending, E::PaymentConfirmed) => Ok(BookingTransition::paid(S::Ongoing)),

            // 线下收款登记：状态不变，只改支付状态
            (S::Ongoing, E::MarkPhysicalPaid) => match mode {
                TeachingMode::Physical => Ok(BookingTransition::paid(S::Ongoing)),
                TeachingMode::Online => Err(BookingTransitionError::InvalidTransition {
                    from: self,
                    event: event.name(),
                }),
            },

            // 评价：completed 且一次为限
            (S::Completed, E::SubmitRating { stars }) => {
                if !(1..=5).contains(stars) {
                    Err(BookingTransitionError::InvalidRating { stars: *stars })
                } else {
                    Ok(BookingTransition::to(S::Rated))
                }
            }

            // 期满扫描：进行中的预约完成，未走完支付流程的预约作废
            (S::Ongoing, E::TermElapsed) => Ok(BookingTransition::to(S::Completed)),
            (S::Pending | S::Confirmed | S::PaymentPending, E::TermElapsed) => {
                Ok(BookingTransition::to(S::Cancelled))
            }

            _ => Err(BookingTransitionError::InvalidTransition {
                from: self,
                event: event.name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::TeachingMode::{Online, Physical};

    const ALL_STATUSES: [BookingStatus; 7] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Ongoing,
        BookingStatus::PaymentPending,
        BookingStatus::Completed,
        BookingStatus::Rated,
        BookingStatus::Cancelled,
    ];

    #[test]
    fn test_confirm_targets_depend_on_mode() {
        let t = BookingStatus::Pending
            .apply(Physical, &BookingEvent::TutorConfirm)
            .unwrap();
        assert_eq!(t.status, BookingStatus::Ongoing);

        let t = BookingStatus::Pending
            .apply(Online, &BookingEvent::TutorConfirm)
            .unwrap();
        assert_eq!(t.status, BookingStatus::Confirmed);
    }

    #[test]
    fn test_cancel_requires_reason() {
        for from in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Ongoing,
        ] {
            assert_eq!(
                from.apply(Online, &BookingEvent::Cancel { reason: "  " }),
                Err(BookingTransitionError::ReasonRequired)
            );
            let t = from
                .apply(Online, &BookingEvent::Cancel { reason: "schedule clash" })
                .unwrap();
            assert_eq!(t.status, BookingStatus::Cancelled);
        }
    }

    #[test]
    fn test_payment_pending_cancel_is_invalid() {
        // 状态表未列出该组合：支付中的预约用户侧不可取消
        assert!(matches!(
            BookingStatus::PaymentPending.apply(Online, &BookingEvent::Cancel { reason: "x" }),
            Err(BookingTransitionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_online_payment_flow() {
        let t = BookingStatus::Confirmed
            .apply(Online, &BookingEvent::InitiatePayment)
            .unwrap();
        assert_eq!(t.status, BookingStatus::PaymentPending);

        // 支付确认回到 ongoing，且标记支付完成
        let t = BookingStatus::PaymentPending
            .apply(Online, &BookingEvent::PaymentConfirmed)
            .unwrap();
        assert_eq!(t.status, BookingStatus::Ongoing);
        assert_eq!(t.payment_state, Some(PaymentState::Completed));
    }

    #[test]
    fn test_physical_cannot_initiate_payment() {
        assert!(matches!(
            BookingStatus::Ongoing.apply(Physical, &BookingEvent::InitiatePayment),
            Err(BookingTransitionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_mark_physical_paid_keeps_status() {
        let t = BookingStatus::Ongoing
            .apply(Physical, &BookingEvent::MarkPhysicalPaid)
            .unwrap();
        assert_eq!(t.status, BookingStatus::Ongoing);
        assert_eq!(t.payment_state, Some(PaymentState::Completed));

        assert!(matches!(
            BookingStatus::Ongoing.apply(Online, &BookingEvent::MarkPhysicalPaid),
            Err(BookingTransitionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_rating_bounds_and_exactly_once() {
        for stars in [0, 6, -1] {
            assert_eq!(
                BookingStatus::Completed.apply(Online, &BookingEvent::SubmitRating { stars }),
                Err(BookingTransitionError::InvalidRating { stars })
            );
        }

        let t = BookingStatus::Completed
            .apply(Online, &BookingEvent::SubmitRating { stars: 5 })
            .unwrap();
        assert_eq!(t.status, BookingStatus::Rated);

        // 第二次评价
        assert_eq!(
            BookingStatus::Rated.apply(Online, &BookingEvent::SubmitRating { stars: 4 }),
            Err(BookingTransitionError::AlreadyRated)
        );
    }

    #[test]
    fn test_term_elapsed_sweep() {
        assert_eq!(
            BookingStatus::Ongoing
                .apply(Online, &BookingEvent::TermElapsed)
                .unwrap()
                .status,
            BookingStatus::Completed
        );
        for from in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::PaymentPending,
        ] {
            assert_eq!(
                from.apply(Online, &BookingEvent::TermElapsed).unwrap().status,
                BookingStatus::Cancelled
            );
        }
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        let events = [
            BookingEvent::TutorConfirm,
            BookingEvent::Cancel { reason: "x" },
            BookingEvent::InitiatePayment,
            BookingEvent::PaymentConfirmed,
            BookingEvent::MarkPhysicalPaid,
            BookingEvent::TermElapsed,
        ];
        for from in [BookingStatus::Cancelled, BookingStatus::Rated] {
            assert!(from.is_terminal());
            for event in &events {
                assert!(
                    matches!(
                        from.apply(Online, event),
                        Err(BookingTransitionError::InvalidTransition { .. })
                    ),
                    "terminal state {from} accepted {}",
                    event.name()
                );
            }
        }
    }

    #[test]
    fn test_totality_unlisted_pairs_rejected() {
        // 穷举所有组合：要么命中转移表，要么必须返回明确错误
        let events = [
            BookingEvent::TutorConfirm,
            BookingEvent::Cancel { reason: "valid reason" },
            BookingEvent::InitiatePayment,
            BookingEvent::PaymentConfirmed,
            BookingEvent::MarkPhysicalPaid,
            BookingEvent::SubmitRating { stars: 3 },
            BookingEvent::TermElapsed,
        ];
        for from in ALL_STATUSES {
            for event in &events {
                for mode in [Online, Physical] {
                    // 不会 panic，错误都有名字
                    let _ = from.apply(mode, event);
                }
            }
        }

        // 几个抽查：未列出的组合确实被拒绝
        assert!(matches!(
            BookingStatus::Completed.apply(Online, &BookingEvent::TutorConfirm),
            Err(BookingTransitionError::InvalidTransition { .. })
        ));
        assert!(matches!(
            BookingStatus::Pending.apply(Online, &BookingEvent::PaymentConfirmed),
            Err(BookingTransitionError::InvalidTransition { .. })
        ));
        assert!(matches!(
            BookingStatus::Pending.apply(Online, &BookingEvent::SubmitRating { stars: 5 }),
            Err(BookingTransitionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_status_string_roundtrip() {
        for status in ALL_STATUSES {
            assert_eq!(status.to_string().parse::<BookingStatus>().unwrap(), status);
        }
        assert_eq!(BookingStatus::PaymentPending.to_string(), "paymentPending");
    }
}
