//! Tests for NAV feed parsing
//!
//! Shared fixtures mirror the layout of the live AMFI feed: a column header,
//! section titles, fund house names and scheme records.


/// A small feed in the shape of the published NAVAll.txt
pub fn sample_feed() -> String {
    [
        "Scheme Code;ISIN Div Payout/ ISIN Growth;ISIN Div Reinvestment;Scheme Name;Net Asset Value;Date",
        "",
        "Open Ended Schemes(Debt Scheme - Banking and PSU Fund)",
        "",
        "Aditya Birla Sun Life Mutual Fund",
        "",
        "119551;INF209K01157;INF209K01165;Aditya Birla Sun Life Equity Fund - Growth;150.2345;15-Jan-2024",
        "119552;INF209K01173;-;Aditya Birla Sun Life Banking & PSU Debt Fund - IDCW;108.9;15-Jan-2024",
        "119553;-;-;\"Aditya Birla Sun Life\" Liquid Fund;N.A.;15-Jan-2024",
        "",
        "Close Ended Schemes(Income)",
        "",
        "Axis Mutual Fund",
        "120001;INF846K01AB2;-;Axis Fixed Term Plan - Series 1;  12.5  ;15-Jan-2024",
        "120002;INF846K01AC0;-;   ;10.0;15-Jan-2024",
        "120003;INF846K01AD8;-;Axis Interval Plan;;15-Jan-2024",
        "",
        "Interval Fund Schemes(Income)",
        "120004;INF846K01AE6;-;Axis Quarterly Interval Fund;-;15-Jan-2024",
    ]
    .join("\r\n")
}
