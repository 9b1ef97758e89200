// 允许 dev-dependencies 中的未使用 extern crate 警告
// 这些依赖仅在测试中使用，不在库代码中使用
#![allow(unused_extern_crates)]
#![forbid(unsafe_code)]
#![warn(
    unused,
    clippy::cognitive_complexity,
    unused_crate_dependencies,
    clippy::unused_self,
    clippy::useless_let_if_seq,
    missing_debug_implementations,
    rust_2018_idioms,
    rust_2024_compatibility
)]
#![allow(clippy::type_complexity, clippy::too_many_arguments, type_alias_bounds)]

//! # Stockdash-Data
//! 股票对比看板的数据访问层：按交易日索引的收盘价表、价格数据源接口以及 Yahoo Finance 实现。
//!
//! * **表格化**: [`DataTable`](table::DataTable) 以"交易日 × 股票代码"的形式保存收盘价或收益率，
//!   缺失值统一表示为 `NaN`。
//! * **可替换**: [`PriceSource`](source::PriceSource) Trait 抽象了价格获取，
//!   既可以接入 [`YahooFinance`](yahoo::YahooFinance)，也可以使用内存中的
//!   [`StaticPriceSource`](source::StaticPriceSource)。
//! * **只读全局状态**: [`TickerUniverse`](universe::TickerUniverse) 在启动时构建一次，之后只读。
//!
//! ## 核心抽象
//! - **DataTable**: 日期严格递增、列与请求的股票代码一一对应的时间序列表。
//! - **PriceSource**: 为一组股票代码和闭区间日期范围提供日收盘价。
//! - **TickerUniverse**: 可搜索的股票代码列表。

use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use smol_str::SmolStr;

/// Stockdash-Data 中生成的所有 [`Error`](std::error::Error)。
pub mod error;

/// 按交易日索引的时间序列表，例如 `PriceTable`、`ReturnsTable`。
pub mod table;

/// [`PriceSource`](source::PriceSource) Trait，以及将逐个股票的收盘价合并为
/// [`PriceTable`](table::PriceTable) 的工具。
pub mod source;

/// Yahoo Finance chart API 的 [`PriceSource`](source::PriceSource) 实现。
pub mod yahoo;

/// 启动时构建一次、之后只读的股票代码列表。
pub mod universe;

/// 股票代码，例如 "AAPL"、"QQQ"。
pub type Ticker = SmolStr;

/// 使用 FNV 哈希、保持插入顺序的 [`IndexMap`]。
pub type FnvIndexMap<K, V> = IndexMap<K, V, FnvBuildHasher>;
