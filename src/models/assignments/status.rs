//! 作业状态机
//!
//! assigned → submitted → completed → reviewed 的主线，
//! 加上到期扫描触发的旁路：没交的作业进 unsubmitted（终态），
//! 已交的作业进 completed 等待点评。迟交落在 overdue，
//! 后续处理与 submitted 一致。

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// 作业状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AssignmentStatus {
    Assigned,
    Submitted,
    Completed,
    Reviewed,
    Unsubmitted,
    Overdue,
}

impl AssignmentStatus {
    /// 截止后不再接受提交的终态
    pub fn is_terminal(self) -> bool {
        matches!(self, AssignmentStatus::Unsubmitted)
    }

    /// 是否允许附加点评
    pub fn accepts_feedback(self) -> bool {
        matches!(self, AssignmentStatus::Completed | AssignmentStatus::Reviewed)
    }
}

impl<'de> Deserialize<'de> for AssignmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的作业状态: '{s}'. 支持的状态: assigned, submitted, completed, reviewed, unsubmitted, overdue"
            ))
        })
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssignmentStatus::Assigned => "assigned",
            AssignmentStatus::Submitted => "submitted",
            AssignmentStatus::Completed => "completed",
            AssignmentStatus::Reviewed => "reviewed",
            AssignmentStatus::Unsubmitted => "unsubmitted",
            AssignmentStatus::Overdue => "overdue",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assigned" => Ok(AssignmentStatus::Assigned),
            "submitted" => Ok(AssignmentStatus::Submitted),
            "completed" => Ok(AssignmentStatus::Completed),
            "reviewed" => Ok(AssignmentStatus::Reviewed),
            "unsubmitted" => Ok(AssignmentStatus::Unsubmitted),
            "overdue" => Ok(AssignmentStatus::Overdue),
            _ => Err(format!("Invalid assignment status: {s}")),
        }
    }
}

/// 作业事件
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssignmentEvent {
    /// 学生提交作业；late 表示已过截止时间
    Submit { late: bool },
    /// 家教确认收到提交（待点评）
    MarkCompleted,
    /// 家教给出点评
    ProvideFeedback,
    /// 截止时间到（后台扫描触发）
    DueDatePassed,
}

impl AssignmentEvent {
    pub fn name(self) -> &'static str {
        match self {
            AssignmentEvent::Submit { .. } => "submit",
            AssignmentEvent::MarkCompleted => "markCompleted",
            AssignmentEvent::ProvideFeedback => "provideFeedback",
            AssignmentEvent::DueDatePassed => "dueDatePassed",
        }
    }
}

/// 作业状态机转移错误
#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentTransitionError {
    InvalidTransition {
        from: AssignmentStatus,
        event: &'static str,
    },
    NotReadyForFeedback { from: AssignmentStatus },
}

impl fmt::Display for AssignmentTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentTransitionError::InvalidTransition { from, event } => {
                write!(f, "Event '{event}' is not allowed in status '{from}'")
            }
            AssignmentTransitionError::NotReadyForFeedback { from } => {
                write!(
                    f,
                    "Feedback can only be provided once the assignment is completed or reviewed, current status is '{from}'"
                )
            }
        }
    }
}

impl std::error::Error for AssignmentTransitionError {}

impl AssignmentStatus {
    /// 应用一个事件，返回新状态或拒绝原因
    pub fn apply(
        self,
        event: AssignmentEvent,
    ) -> Result<AssignmentStatus, AssignmentTransitionError> {
        use AssignmentEvent as E;
        use AssignmentStatus as S;

        match (self, event) {
            // 提交：按时进 submitted，迟交进 overdue
            (S::Assigned, E::Submit { late: false }) => Ok(S::Submitted),
            (S::Assigned, E::Submit { late: true }) => Ok(S::Overdue),

            // 家教确认收到提交
            (S::Submitted | S::Overdue, E::MarkCompleted) => Ok(S::Completed),

            // 点评：completed/reviewed 允许（reviewed 上重复点评覆盖旧点评）
            (S::Completed | S::Reviewed, E::ProvideFeedback) => Ok(S::Reviewed),
            (_, E::ProvideFeedback) => {
                Err(AssignmentTransitionError::NotReadyForFeedback { from: self })
            }

            // 到期扫描：没交的作废，已交的转入待点评
            (S::Assigned, E::DueDatePassed) => Ok(S::Unsubmitted),
            (S::Submitted | S::Overdue, E::DueDatePassed) => Ok(S::Completed),

            _ => Err(AssignmentTransitionError::InvalidTransition {
                from: self,
                event: event.name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let s = AssignmentStatus::Assigned
            .apply(AssignmentEvent::Submit { late: false })
            .unwrap();
        assert_eq!(s, AssignmentStatus::Submitted);

        let s = s.apply(AssignmentEvent::MarkCompleted).unwrap();
        assert_eq!(s, AssignmentStatus::Completed);

        let s = s.apply(AssignmentEvent::ProvideFeedback).unwrap();
        assert_eq!(s, AssignmentStatus::Reviewed);
    }

    #[test]
    fn test_late_submission_is_overdue() {
        let s = AssignmentStatus::Assigned
            .apply(AssignmentEvent::Submit { late: true })
            .unwrap();
        assert_eq!(s, AssignmentStatus::Overdue);
        // 迟交的作业同样可以被确认与点评
        assert_eq!(
            s.apply(AssignmentEvent::MarkCompleted).unwrap(),
            AssignmentStatus::Completed
        );
    }

    #[test]
    fn test_due_date_sweep() {
        assert_eq!(
            AssignmentStatus::Assigned
                .apply(AssignmentEvent::DueDatePassed)
                .unwrap(),
            AssignmentStatus::Unsubmitted
        );
        assert_eq!(
            AssignmentStatus::Submitted
                .apply(AssignmentEvent::DueDatePassed)
                .unwrap(),
            AssignmentStatus::Completed
        );
        assert_eq!(
            AssignmentStatus::Overdue
                .apply(AssignmentEvent::DueDatePassed)
                .unwrap(),
            AssignmentStatus::Completed
        );
    }

    #[test]
    fn test_unsubmitted_is_terminal() {
        assert!(AssignmentStatus::Unsubmitted.is_terminal());
        // 截止后不再接受提交
        assert!(matches!(
            AssignmentStatus::Unsubmitted.apply(AssignmentEvent::Submit { late: true }),
            Err(AssignmentTransitionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_feedback_gating() {
        for from in [
            AssignmentStatus::Assigned,
            AssignmentStatus::Submitted,
            AssignmentStatus::Overdue,
            AssignmentStatus::Unsubmitted,
        ] {
            assert_eq!(
                from.apply(AssignmentEvent::ProvideFeedback),
                Err(AssignmentTransitionError::NotReadyForFeedback { from })
            );
        }

        // reviewed 上允许再次点评
        assert_eq!(
            AssignmentStatus::Reviewed
                .apply(AssignmentEvent::ProvideFeedback)
                .unwrap(),
            AssignmentStatus::Reviewed
        );
    }

    #[test]
    fn test_double_submit_rejected() {
        assert!(matches!(
            AssignmentStatus::Submitted.apply(AssignmentEvent::Submit { late: false }),
            Err(AssignmentTransitionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_status_string_roundtrip() {
        for status in [
            AssignmentStatus::Assigned,
            AssignmentStatus::Submitted,
            AssignmentStatus::Completed,
            AssignmentStatus::Reviewed,
            AssignmentStatus::Unsubmitted,
            AssignmentStatus::Overdue,
        ] {
            assert_eq!(
                status.to_string().parse::<AssignmentStatus>().unwrap(),
                status
            );
        }
    }
}
