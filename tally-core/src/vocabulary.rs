//! Keyword vocabularies consulted by the extraction engine.
//!
//! Every table is an ordered list: declaration order is the tie-break for category
//! scoring and the scan order for date/time cues. The built-in vocabulary is built once
//! per process and never mutated; alternates can be loaded from TOML.

use anyhow::{Context, Result, bail};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Name used when a category table is somehow empty
pub const OTHER_CATEGORY: &str = "其他";

/// One category and the substrings that vote for it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryKeywords {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Ordered category → keywords mapping. The last entry is the default ("Other").
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CategoryKeywordTable(Vec<CategoryKeywords>);

impl CategoryKeywordTable {
    pub fn new(entries: Vec<CategoryKeywords>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[CategoryKeywords] {
        &self.0
    }

    /// The reserved default category (last declared entry)
    pub fn fallback(&self) -> &str {
        self.0
            .last()
            .map(|c| c.name.as_str())
            .unwrap_or(OTHER_CATEGORY)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|c| c.name.as_str())
    }

    fn validate(&self, which: &str) -> Result<()> {
        if self.0.is_empty() {
            bail!("{which} category table is empty");
        }
        for entry in &self.0 {
            if entry.name.trim().is_empty() {
                bail!("{which} category table has an unnamed entry");
            }
            if entry.keywords.iter().any(|k| k.is_empty()) {
                bail!("{which} category '{}' has an empty keyword", entry.name);
            }
        }
        Ok(())
    }
}

/// A day keyword and its offset from the reference date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayOffset {
    pub keyword: String,
    pub offset: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RelativeDateTable(Vec<DayOffset>);

impl RelativeDateTable {
    pub fn new(entries: Vec<DayOffset>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[DayOffset] {
        &self.0
    }

    /// First entry, in declaration order, whose keyword occurs in `text`
    pub fn find(&self, text: &str) -> Option<&DayOffset> {
        self.0.iter().find(|d| text.contains(d.keyword.as_str()))
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|d| d.keyword.as_str())
    }
}

/// A time-of-day keyword and the clock time it stands for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClockTime {
    pub keyword: String,
    pub hour: u32,
    pub minute: u32,
    /// Meal words ("早餐") set the clock but are kept in the description
    #[serde(default)]
    pub meal: bool,
}

impl ClockTime {
    /// Clock time with seconds zeroed; `None` if hour/minute are out of range
    pub fn time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TimeOfDayTable(Vec<ClockTime>);

impl TimeOfDayTable {
    pub fn new(entries: Vec<ClockTime>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[ClockTime] {
        &self.0
    }

    /// First entry, in declaration order, whose keyword occurs in `text`
    pub fn find(&self, text: &str) -> Option<&ClockTime> {
        self.0.iter().find(|t| text.contains(t.keyword.as_str()))
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|t| t.keyword.as_str())
    }
}

/// Complete keyword set for one language variant of the engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vocabulary {
    /// Any one of these marks the utterance as income
    pub income_keywords: Vec<String>,
    /// Verbs that sit next to an amount ("花了30", "5000收入")
    pub action_keywords: Vec<String>,
    /// Currency words that may follow an amount
    pub currency_marks: Vec<String>,
    pub expense: CategoryKeywordTable,
    pub income: CategoryKeywordTable,
    pub relative_dates: RelativeDateTable,
    pub times_of_day: TimeOfDayTable,
}

static BUILTIN: LazyLock<Vocabulary> = LazyLock::new(Vocabulary::chinese);

impl Vocabulary {
    /// Process-wide built-in vocabulary
    pub fn builtin() -> &'static Vocabulary {
        &BUILTIN
    }

    /// Parse and validate a vocabulary from TOML
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let vocab: Vocabulary = toml::from_str(s).context("parse vocabulary")?;
        vocab.validate()?;
        Ok(vocab)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize vocabulary")
    }

    /// Check the invariants the engine relies on
    pub fn validate(&self) -> Result<()> {
        if self.action_keywords.is_empty() || self.action_keywords.iter().any(|k| k.is_empty()) {
            bail!("action keywords must be non-empty strings");
        }
        if self.currency_marks.is_empty() || self.currency_marks.iter().any(|k| k.is_empty()) {
            bail!("currency marks must be non-empty strings");
        }
        if self.income_keywords.iter().any(|k| k.is_empty()) {
            bail!("income keywords must be non-empty strings");
        }
        self.expense.validate("expense")?;
        self.income.validate("income")?;
        if let Some(d) = self.relative_dates.entries().iter().find(|d| d.keyword.is_empty()) {
            bail!("relative date with offset {} has an empty keyword", d.offset);
        }
        for t in self.times_of_day.entries() {
            if t.keyword.is_empty() {
                bail!("time-of-day entry {:02}:{:02} has an empty keyword", t.hour, t.minute);
            }
            if t.time().is_none() {
                bail!("time-of-day '{}' is not a valid clock time", t.keyword);
            }
        }
        Ok(())
    }

    /// Category table for the given direction
    pub fn categories(&self, kind: crate::TransactionType) -> &CategoryKeywordTable {
        match kind {
            crate::TransactionType::Expense => &self.expense,
            crate::TransactionType::Income => &self.income,
        }
    }

    fn chinese() -> Self {
        Self {
            income_keywords: words(&[
                "工资", "薪水", "薪资", "收入", "收到", "赚", "得到", "奖金",
                "提成", "分红", "利息", "红包", "转账收", "退款", "兼职", "转入",
            ]),
            action_keywords: words(&[
                "花了", "花费", "消费", "支出", "收入", "收到", "赚了", "得到",
            ]),
            currency_marks: words(&["元", "块", "￥", "¥", "$"]),
            expense: CategoryKeywordTable::new(vec![
                category("餐饮", &[
                    "早餐", "午餐", "晚餐", "早饭", "午饭", "晚饭", "吃饭", "外卖",
                    "奶茶", "咖啡", "饮料", "零食", "水果", "买菜", "超市", "食品",
                    "餐厅", "火锅", "烧烤", "小吃", "面包", "蛋糕", "点心", "饭", "菜",
                    "宵夜", "夜宵", "聚餐", "食堂", "盒饭", "快餐", "汉堡", "炸鸡",
                ]),
                category("交通", &[
                    "打车", "出租", "滴滴", "公交", "地铁", "高铁", "火车", "飞机",
                    "机票", "车票", "加油", "油费", "停车", "过路费", "共享单车", "骑车",
                    "出行", "uber", "曹操", "首汽", "神州", "嘀嗒",
                ]),
                category("购物", &[
                    "淘宝", "京东", "拼多多", "网购", "购物", "买东西", "天猫", "唯品会",
                ]),
                category("娱乐", &[
                    "电影", "游戏", "KTV", "唱歌", "旅游", "门票", "演出", "酒吧",
                    "健身", "运动", "球", "游泳", "瑜伽", "景点",
                ]),
                category("医疗", &[
                    "医院", "药", "看病", "体检", "挂号", "医药", "诊所", "牙科", "眼科",
                ]),
                category("教育", &[
                    "课程", "培训", "学费", "书", "教材", "考试", "补习", "网课", "学习",
                ]),
                category("居住", &[
                    "房租", "租金", "物业", "水电", "电费", "水费", "燃气", "网费", "宽带",
                    "暖气", "空调", "维修", "装修",
                ]),
                category("通讯", &["话费", "手机费", "流量", "充值", "套餐"]),
                category("服饰", &[
                    "衣服", "裤子", "鞋", "帽子", "包", "配饰", "化妆品", "护肤", "洗护",
                    "内衣", "袜子", "外套", "T恤",
                ]),
                category(OTHER_CATEGORY, &[]),
            ]),
            income: CategoryKeywordTable::new(vec![
                category("工资", &["工资", "薪水", "薪资", "月薪", "底薪", "发工资"]),
                category("奖金", &["奖金", "年终奖", "绩效", "提成", "分红", "奖励"]),
                category("投资", &["利息", "股票", "基金", "理财", "分红", "收益", "回报"]),
                category("兼职", &["兼职", "副业", "外快", "私活", "零工"]),
                category("红包", &["红包", "转账", "礼金", "随份子", "压岁钱"]),
                category(OTHER_CATEGORY, &[]),
            ]),
            // "大前天" contains "前天"; it is listed first or it could never match.
            relative_dates: RelativeDateTable::new(vec![
                day("今天", 0),
                day("今日", 0),
                day("昨天", -1),
                day("昨日", -1),
                day("大前天", -3),
                day("前天", -2),
                day("前几天", -3),
                day("上周", -7),
                day("上星期", -7),
            ]),
            times_of_day: TimeOfDayTable::new(vec![
                clock("凌晨", 3, 0),
                clock("早上", 7, 30),
                clock("早晨", 7, 30),
                meal("早餐", 7, 30),
                meal("早饭", 7, 30),
                clock("上午", 10, 0),
                clock("中午", 12, 0),
                meal("午饭", 12, 0),
                meal("午餐", 12, 0),
                clock("下午", 15, 0),
                clock("傍晚", 18, 0),
                clock("晚上", 19, 30),
                meal("晚饭", 18, 30),
                meal("晚餐", 18, 30),
                clock("夜里", 22, 0),
                clock("深夜", 23, 30),
                meal("宵夜", 22, 30),
                meal("夜宵", 22, 30),
            ]),
        }
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn category(name: &str, keywords: &[&str]) -> CategoryKeywords {
    CategoryKeywords {
        name: name.to_string(),
        keywords: words(keywords),
    }
}

fn day(keyword: &str, offset: i64) -> DayOffset {
    DayOffset {
        keyword: keyword.to_string(),
        offset,
    }
}

fn clock(keyword: &str, hour: u32, minute: u32) -> ClockTime {
    ClockTime {
        keyword: keyword.to_string(),
        hour,
        minute,
        meal: false,
    }
}

fn meal(keyword: &str, hour: u32, minute: u32) -> ClockTime {
    ClockTime {
        meal: true,
        ..clock(keyword, hour, minute)
    }
}
