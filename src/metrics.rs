use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard, OnceLock},
};

static METRICS: OnceLock<Mutex<MetricsState>> = OnceLock::new();

/// 延迟分桶上界（毫秒）：<50, <100, <250, <500, <1000, >=1000
const LATENCY_BOUNDS_MS: [u128; 5] = [50, 100, 250, 500, 1000];

#[derive(Default)]
struct MetricsState {
    // 查询结果分类计数：live / synthetic / failure:<code>
    lookups: BTreeMap<String, u64>,
    superseded: u64,
    // 上游成功/失败与时延统计（毫秒）
    upstream_ok: u64,
    upstream_err: u64,
    upstream_latency_sum_ms: u128,
    upstream_hist_buckets: [u64; 6],
}

fn state() -> MutexGuard<'static, MetricsState> {
    let lock = METRICS.get_or_init(|| Mutex::new(MetricsState::default()));
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(), // 避免因锁污染导致 panic
    }
}

/// 记录一次查询的最终结果
pub fn inc_lookup(outcome: &str) {
    let mut s = state();
    *s.lookups.entry(outcome.to_string()).or_insert(0) += 1;
}

/// 记录一次被新请求取代的查询
pub fn inc_lookup_superseded() {
    state().superseded += 1;
}

pub fn observe_upstream_latency_ms(latency_ms: u128, ok: bool) {
    let mut s = state();
    if ok {
        s.upstream_ok += 1;
    } else {
        s.upstream_err += 1;
    }
    s.upstream_latency_sum_ms += latency_ms;
    let b = LATENCY_BOUNDS_MS
        .iter()
        .position(|bound| latency_ms < *bound)
        .unwrap_or(LATENCY_BOUNDS_MS.len());
    s.upstream_hist_buckets[b] += 1;
}

/// 当前某类查询结果的计数
pub fn lookup_count(outcome: &str) -> u64 {
    state().lookups.get(outcome).copied().unwrap_or(0)
}

pub fn render_prometheus() -> String {
    let s = state();
    let mut out = String::new();

    out.push_str("# HELP ironscan_lookups_total Completed lookups by outcome\n");
    out.push_str("# TYPE ironscan_lookups_total counter\n");
    for (k, v) in s.lookups.iter() {
        out.push_str(&format!(
            "ironscan_lookups_total{{outcome=\"{}\"}} {}\n",
            k, v
        ));
    }

    out.push_str("# HELP ironscan_lookups_superseded_total Lookups dropped for a newer request\n");
    out.push_str("# TYPE ironscan_lookups_superseded_total counter\n");
    out.push_str(&format!(
        "ironscan_lookups_superseded_total {}\n",
        s.superseded
    ));

    // 上游统计
    out.push_str("# HELP ironscan_upstream_requests_total Upstream requests\n");
    out.push_str("# TYPE ironscan_upstream_requests_total counter\n");
    out.push_str(&format!(
        "ironscan_upstream_requests_total{{result=\"ok\"}} {}\n",
        s.upstream_ok
    ));
    out.push_str(&format!(
        "ironscan_upstream_requests_total{{result=\"err\"}} {}\n",
        s.upstream_err
    ));

    out.push_str("# HELP ironscan_upstream_latency_ms_sum Sum of upstream latency in ms\n");
    out.push_str("# TYPE ironscan_upstream_latency_ms_sum counter\n");
    out.push_str(&format!(
        "ironscan_upstream_latency_ms_sum {}\n",
        s.upstream_latency_sum_ms
    ));

    out.push_str("# HELP ironscan_upstream_latency_ms_bucket Upstream latency histogram buckets\n");
    out.push_str("# TYPE ironscan_upstream_latency_ms_bucket histogram\n");
    let mut cumulative = 0u64;
    for (i, bound) in LATENCY_BOUNDS_MS.iter().enumerate() {
        cumulative += s.upstream_hist_buckets[i];
        out.push_str(&format!(
            "ironscan_upstream_latency_ms_bucket{{le=\"{}\"}} {}\n",
            bound, cumulative
        ));
    }
    // +Inf 桶
    out.push_str(&format!(
        "ironscan_upstream_latency_ms_bucket{{le=\"+Inf\"}} {}\n",
        s.upstream_hist_buckets.iter().sum::<u64>()
    ));

    out
}
