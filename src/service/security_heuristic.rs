//! 安全评分（示意性启发式）
//!
//! 五项检查按固定通过概率抽样，得分 = round(100 × 通过数 / 总数)。
//! 结果是随机的占位评分，不是真实的风控模型，不能作为安全保证。
//! 随机源由调用方注入，测试中使用固定种子。

use rand::Rng;

use crate::domain::{SecurityAssessment, SecurityCheck, SecurityStatus};

/// "Malicious Activity" 检查的通过概率
pub const MALICIOUS_ACTIVITY_PASS_PROBABILITY: f64 = 0.9;

/// "High-Risk Transactions" 检查的通过概率
pub const HIGH_RISK_TRANSACTIONS_PASS_PROBABILITY: f64 = 0.8;

/// 单项检查定义
#[derive(Debug, Clone, PartialEq)]
pub struct CheckSpec {
    pub name: &'static str,
    /// 通过概率，>= 1.0 视为必然通过（不消耗随机数）
    pub pass_probability: f64,
}

impl CheckSpec {
    pub const fn new(name: &'static str, pass_probability: f64) -> Self {
        Self {
            name,
            pass_probability,
        }
    }

    fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        if self.pass_probability >= 1.0 {
            return true;
        }
        if self.pass_probability <= 0.0 || self.pass_probability.is_nan() {
            return false;
        }
        rng.gen_bool(self.pass_probability)
    }
}

/// 默认检查项
///
/// 地址格式检查必然通过：进入评估前地址已经通过格式校验
pub const REFERENCE_CHECKS: [CheckSpec; 5] = [
    CheckSpec::new("Address Format", 1.0),
    CheckSpec::new("Malicious Activity", MALICIOUS_ACTIVITY_PASS_PROBABILITY),
    CheckSpec::new("High-Risk Transactions", HIGH_RISK_TRANSACTIONS_PASS_PROBABILITY),
    CheckSpec::new("Smart Contract Interactions", 1.0),
    CheckSpec::new("Network Consistency", 1.0),
];

#[derive(Debug, Clone)]
pub struct SecurityHeuristic {
    checks: Vec<CheckSpec>,
}

impl Default for SecurityHeuristic {
    fn default() -> Self {
        Self {
            checks: REFERENCE_CHECKS.to_vec(),
        }
    }
}

impl SecurityHeuristic {
    pub fn with_checks(checks: Vec<CheckSpec>) -> Self {
        Self { checks }
    }

    pub fn checks(&self) -> &[CheckSpec] {
        &self.checks
    }

    pub fn assess<R: Rng + ?Sized>(&self, address: &str, rng: &mut R) -> SecurityAssessment {
        let checks: Vec<SecurityCheck> = self
            .checks
            .iter()
            .map(|spec| SecurityCheck {
                name: spec.name.to_string(),
                passed: spec.run(rng),
            })
            .collect();

        let score = score_of(&checks);
        let status = SecurityStatus::from_score(score);

        tracing::debug!(
            address = %crate::utils::mask_address(address),
            score,
            status = status.as_str(),
            "security heuristic evaluated"
        );

        SecurityAssessment {
            status,
            score,
            color: status.color().to_string(),
            checks,
        }
    }
}

fn score_of(checks: &[SecurityCheck]) -> u8 {
    if checks.is_empty() {
        return 0;
    }
    let passed = checks.iter().filter(|c| c.passed).count();
    (100.0 * passed as f64 / checks.len() as f64).round() as u8
}
