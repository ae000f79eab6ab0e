//! 星期集合
//!
//! 原始数据以 "Monday".."Sunday" 字符串存储；内部统一转成 8 位位集，
//! 星期交集退化为一次按位与，避免字符串比较带来的大小写/拼写问题。

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// 星期（JSON 中使用完整英文名）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scheduling.ts")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    fn bit(self) -> u8 {
        match self {
            Weekday::Monday => 1 << 0,
            Weekday::Tuesday => 1 << 1,
            Weekday::Wednesday => 1 << 2,
            Weekday::Thursday => 1 << 3,
            Weekday::Friday => 1 << 4,
            Weekday::Saturday => 1 << 5,
            Weekday::Sunday => 1 << 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的星期: '{s}'. 支持的值: Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday"
            ))
        })
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Monday" => Ok(Weekday::Monday),
            "Tuesday" => Ok(Weekday::Tuesday),
            "Wednesday" => Ok(Weekday::Wednesday),
            "Thursday" => Ok(Weekday::Thursday),
            "Friday" => Ok(Weekday::Friday),
            "Saturday" => Ok(Weekday::Saturday),
            "Sunday" => Ok(Weekday::Sunday),
            _ => Err(format!("Invalid weekday: {s}")),
        }
    }
}

/// 星期位集（每位对应一个星期）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DaySet(u8);

impl DaySet {
    pub const fn empty() -> Self {
        DaySet(0)
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= day.bit();
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & day.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// 两个星期集合的交集
    pub fn intersection(self, other: DaySet) -> DaySet {
        DaySet(self.0 & other.0)
    }

    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |d| self.contains(*d))
    }

    pub fn to_vec(self) -> Vec<Weekday> {
        self.iter().collect()
    }
}

impl FromIterator<Weekday> for DaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = DaySet::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl From<&[Weekday]> for DaySet {
    fn from(days: &[Weekday]) -> Self {
        days.iter().copied().collect()
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for day in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{day}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_is_bitwise() {
        let a: DaySet = [Weekday::Monday, Weekday::Wednesday].into_iter().collect();
        let b: DaySet = [Weekday::Wednesday, Weekday::Friday].into_iter().collect();
        let shared = a.intersection(b);
        assert!(shared.contains(Weekday::Wednesday));
        assert!(!shared.contains(Weekday::Monday));
        assert!(!shared.contains(Weekday::Friday));
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn test_disjoint_sets_have_empty_intersection() {
        let a: DaySet = [Weekday::Monday].into_iter().collect();
        let b: DaySet = [Weekday::Tuesday].into_iter().collect();
        assert!(a.intersection(b).is_empty());
    }

    #[test]
    fn test_display_joins_day_names() {
        let set: DaySet = [Weekday::Monday, Weekday::Wednesday].into_iter().collect();
        assert_eq!(set.to_string(), "Monday, Wednesday");
    }

    #[test]
    fn test_weekday_roundtrip() {
        for day in Weekday::ALL {
            assert_eq!(day.as_str().parse::<Weekday>().unwrap(), day);
        }
        assert!("monday".parse::<Weekday>().is_err());
    }
}
