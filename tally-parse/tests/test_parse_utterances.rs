use chrono::{DateTime, Duration, NaiveTime, TimeZone, Timelike};
use chrono_tz::{Asia::Shanghai, Tz};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tally_core::{CategoryKeywordTable, CategoryKeywords};
use tally_parse::{Extractor, TransactionType, Vocabulary};

fn reference() -> DateTime<Tz> {
    Shanghai.with_ymd_and_hms(2026, 10, 18, 20, 15, 42).unwrap()
}

fn extractor() -> Extractor<'static> {
    Extractor::builtin().unwrap()
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn test_breakfast_with_currency() {
    let now = reference();
    let txn = extractor().parse("早餐15块", &now).unwrap();

    assert_eq!(txn.amount, Decimal::from(15));
    assert_eq!(txn.kind, TransactionType::Expense);
    assert_eq!(txn.category, "餐饮");
    assert_eq!(txn.description, "早餐");
    assert_eq!(txn.timestamp.date_naive(), now.date_naive());
    assert_eq!(txn.timestamp.time(), hm(7, 30));
    assert_eq!(txn.time_label.as_deref(), Some("早餐"));
}

#[test]
fn test_yesterday_noon_meal() {
    let now = reference();
    let txn = extractor().parse("昨天中午吃饭30", &now).unwrap();

    assert_eq!(txn.amount, Decimal::from(30));
    assert_eq!(txn.kind, TransactionType::Expense);
    assert_eq!(txn.category, "餐饮");
    assert_eq!(txn.timestamp.date_naive(), now.date_naive() - Duration::days(1));
    assert_eq!(txn.timestamp.time(), hm(12, 0));
    assert_eq!(txn.description, "吃饭");
    assert_eq!(txn.time_label.as_deref(), Some("昨天中午"));
}

#[test]
fn test_salary_income() {
    let txn = extractor().parse("收到工资5000", &reference()).unwrap();
    assert_eq!(txn.amount, Decimal::from(5000));
    assert_eq!(txn.kind, TransactionType::Income);
    assert_eq!(txn.category, "工资");
}

#[test]
fn test_strings_without_numbers_are_absent() {
    let ex = extractor();
    for text in ["", "   ", "早餐", "昨天中午吃饭", "收到工资", "打车去公司", "花了不少钱"] {
        assert!(ex.parse(text, &reference()).is_none(), "{text:?} should be absent");
    }
}

#[test]
fn test_currency_marked_number_is_the_amount() {
    let ex = extractor();
    let cases = [
        ("午饭35元", "35"),
        ("3点打车花了18块", "18"),
        ("9点前买了2杯咖啡共56元", "56"),
        ("奶茶12.5元", "12.5"),
        ("上周加油300￥", "300"),
        ("充值话费50块 赠送10", "50"),
    ];
    for (text, expected) in cases {
        let txn = ex.parse(text, &reference()).unwrap();
        assert_eq!(txn.amount, Decimal::from_str(expected).unwrap(), "{text}");
    }
}

#[test]
fn test_number_next_to_dian_is_the_amount() {
    let now = reference();
    let ex = extractor();

    let txn = ex.parse("游戏充值648点券", &now).unwrap();
    assert_eq!(txn.amount, Decimal::from(648));
    assert_eq!(txn.category, "娱乐");
    assert_eq!(txn.timestamp, now.fixed_offset());

    let txn = ex.parse("买了100点卡", &now).unwrap();
    assert_eq!(txn.amount, Decimal::from(100));

    let txn = ex.parse("停车3时", &now).unwrap();
    assert_eq!(txn.amount, Decimal::from(3));
    assert_eq!(txn.category, "交通");
}

#[test]
fn test_a_few_days_ago() {
    let now = reference();
    let txn = extractor().parse("前几天打车20", &now).unwrap();
    assert_eq!(txn.amount, Decimal::from(20));
    assert_eq!(txn.category, "交通");
    assert_eq!(txn.timestamp.date_naive(), now.date_naive() - Duration::days(3));
    assert_eq!(txn.timestamp.time(), now.time());
    assert_eq!(txn.description, "打车");
    assert_eq!(txn.time_label.as_deref(), Some("前几天"));
}

#[test]
fn test_record_json_shape() {
    let txn = extractor().parse("昨天中午吃饭30", &reference()).unwrap();
    let json = serde_json::to_value(&txn).unwrap();
    assert_eq!(json["type"], "expense");
    assert_eq!(json["category"], "餐饮");
    assert_eq!(json["description"], "吃饭");
    assert_eq!(json["timestamp"], "2026-10-17T12:00:00+08:00");
    assert_eq!(json["timeLabel"], "昨天中午");

    let txn = extractor().parse("淘宝买东西99", &reference()).unwrap();
    let json = serde_json::to_value(&txn).unwrap();
    assert!(json.get("timeLabel").is_none());
    assert!(json.get("time_label").is_none());
}

#[test]
fn test_time_of_day_keyword_beats_numeric_time() {
    let txn = extractor().parse("晚饭7点20吃火锅花了200", &reference()).unwrap();
    assert_eq!(txn.timestamp.time(), hm(18, 30));
    assert_eq!(txn.amount, Decimal::from(200));
}

#[test]
fn test_numeric_time_without_keyword() {
    let now = reference();
    let txn = extractor().parse("前天13:45看电影60元", &now).unwrap();
    assert_eq!(txn.category, "娱乐");
    assert_eq!(txn.timestamp.date_naive(), now.date_naive() - Duration::days(2));
    assert_eq!(txn.timestamp.time(), hm(13, 45));
    assert_eq!(txn.description, "看电影");
    assert_eq!(txn.time_label.as_deref(), Some("前天下午 13:45"));
}

#[test]
fn test_no_cues_keep_reference_instant() {
    let now = reference();
    let txn = extractor().parse("淘宝买东西99", &now).unwrap();
    assert_eq!(txn.timestamp, now.fixed_offset());
    assert_eq!(txn.timestamp.second(), 42);
    assert_eq!(txn.category, "购物");
    assert_eq!(txn.time_label, None);
}

#[test]
fn test_specific_keyword_outranks_generic() {
    // 火锅 (餐饮, 2) vs 球 (娱乐, 1)
    let txn = extractor().parse("打完球吃火锅120", &reference()).unwrap();
    assert_eq!(txn.category, "餐饮");
}

#[test]
fn test_income_categories() {
    let ex = extractor();
    let cases = [
        ("年终奖金到账20000元", "奖金"),
        ("基金利息收入35.2", "投资"),
        ("周末兼职赚了400", "兼职"),
        ("过年收到压岁钱红包888", "红包"),
        ("退款12元", "其他"),
    ];
    for (text, category) in cases {
        let txn = ex.parse(text, &reference()).unwrap();
        assert_eq!(txn.kind, TransactionType::Income, "{text}");
        assert_eq!(txn.category, category, "{text}");
    }
}

#[test]
fn test_category_tie_resolves_to_earlier_declared() {
    let mut vocab = Vocabulary::builtin().clone();
    vocab.expense = CategoryKeywordTable::new(vec![
        CategoryKeywords {
            name: "早".to_string(),
            keywords: vec!["咖啡".to_string()],
        },
        CategoryKeywords {
            name: "晚".to_string(),
            keywords: vec!["蛋糕".to_string()],
        },
        CategoryKeywords {
            name: "其他".to_string(),
            keywords: vec![],
        },
    ]);
    let ex = Extractor::new(&vocab).unwrap();
    let txn = ex.parse("蛋糕和咖啡45元", &reference()).unwrap();
    assert_eq!(txn.category, "早");
}

#[test]
fn test_parse_is_deterministic() {
    let ex = extractor();
    let now = reference();
    for text in ["早餐15块", "昨天中午吃饭30", "收到工资5000", "深夜打车回家78.9元"] {
        let a = ex.parse(text, &now);
        let b = ex.parse(text, &now);
        assert_eq!(a, b);
        assert!(a.is_some());
    }
}

#[test]
fn test_concurrent_callers_agree() {
    let ex = Arc::new(extractor());
    let now = reference();
    let expected = ex.parse("大前天晚上看电影80元", &now).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ex = Arc::clone(&ex);
            let now = now.clone();
            std::thread::spawn(move || ex.parse("大前天晚上看电影80元", &now).unwrap())
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
    assert_eq!(expected.timestamp.date_naive(), now.date_naive() - Duration::days(3));
    assert_eq!(expected.timestamp.time(), hm(19, 30));
}

#[test]
fn test_description_never_exceeds_limit() {
    let text = "今天和大学室友们一起去市中心新开的那家据说排队要两个小时的网红日料店吃饭人均三百八十八元";
    let txn = extractor().parse(&format!("{text} 1164元"), &reference()).unwrap();
    assert!(txn.description.chars().count() <= 30);
    assert_eq!(txn.amount, Decimal::from(1164));
}
