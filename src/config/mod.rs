/// 경매 서비스 설정
/// 환경 변수는 프로세스 시작 시 한 번만 읽고, 이후에는 값 객체로 전달한다.
// region:    --- Imports
use std::time::Duration;

// endregion: --- Imports

// region:    --- Constants
/// 경매 유지 시간 환경 변수
pub const AUCTION_INTERVAL_ENV: &str = "AUCTION_INTERVAL";
/// 만료 검사 주기 환경 변수
pub const AUCTION_CLOSE_CHECK_INTERVAL_ENV: &str = "AUCTION_CLOSE_CHECK_INTERVAL";

/// 기본 경매 유지 시간 (5분)
pub const DEFAULT_AUCTION_INTERVAL: Duration = Duration::from_secs(5 * 60);
/// 기본 만료 검사 주기 (10초)
pub const DEFAULT_CLOSE_CHECK_INTERVAL: Duration = Duration::from_secs(10);

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

// endregion: --- Constants

// region:    --- Config
/// 경매 수명 주기 설정
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuctionConfig {
    /// 경매가 Active 상태로 유지되는 시간
    pub auction_interval: Duration,
    /// 만료 경매 검사 주기
    pub close_check_interval: Duration,
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self {
            auction_interval: DEFAULT_AUCTION_INTERVAL,
            close_check_interval: DEFAULT_CLOSE_CHECK_INTERVAL,
        }
    }
}

impl AuctionConfig {
    pub fn new(auction_interval: Duration, close_check_interval: Duration) -> Self {
        Self {
            auction_interval,
            close_check_interval,
        }
    }

    /// 환경 변수에서 설정 생성
    pub fn from_env() -> Self {
        let auction_interval = resolve_duration(AUCTION_INTERVAL_ENV, DEFAULT_AUCTION_INTERVAL);
        let close_check_interval = resolve_duration(
            AUCTION_CLOSE_CHECK_INTERVAL_ENV,
            DEFAULT_CLOSE_CHECK_INTERVAL,
        );

        Self::new(auction_interval, close_check_interval)
    }
}

/// 애플리케이션 전체 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub auction: AuctionConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Self {
            database_url,
            bind_addr,
            auction: AuctionConfig::from_env(),
        }
    }
}

// endregion: --- Config

// region:    --- Duration Resolver
/// 환경 변수에서 기간 값을 읽는다.
/// 값이 없거나 파싱에 실패하면 조용히 기본값을 반환한다.
pub fn resolve_duration(name: &str, default: Duration) -> Duration {
    std::env::var(name)
        .ok()
        .and_then(|value| parse_duration(&value))
        .unwrap_or(default)
}

/// 기간 표현식 파싱 ("300ms", "1.5h", "2h45m")
///
/// 단위: ns, us (µs, μs), ms, s, m, h
/// 음수, 단위 없는 숫자("0" 제외), 범위를 넘는 값은 `None`.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Some(Duration::ZERO);
    }
    if s.is_empty() {
        return None;
    }

    let mut total: u128 = 0;
    while !s.is_empty() {
        let int_len = s.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, rest) = s.split_at(int_len);
        s = rest;

        let mut frac_part = "";
        if let Some(rest) = s.strip_prefix('.') {
            let frac_len = rest.bytes().take_while(u8::is_ascii_digit).count();
            (frac_part, s) = rest.split_at(frac_len);
        }
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }

        let unit_len = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_len == 0 {
            return None;
        }
        let (unit, rest) = s.split_at(unit_len);
        s = rest;

        let unit_nanos: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60 * 1_000_000_000,
            "h" => 60 * 60 * 1_000_000_000,
            _ => return None,
        };

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().ok()?
        };
        let mut nanos = whole.checked_mul(unit_nanos)?;

        if !frac_part.is_empty() {
            // 나노초 이하 정밀도는 버린다
            let digits = &frac_part[..frac_part.len().min(18)];
            let fraction: u128 = digits.parse().ok()?;
            let scale = 10u128.pow(digits.len() as u32);
            nanos = nanos.checked_add(fraction * unit_nanos / scale)?;
        }

        total = total.checked_add(nanos)?;
        if total > i64::MAX as u128 {
            return None;
        }
    }

    if negative && total > 0 {
        return None;
    }

    Some(Duration::from_nanos(total as u64))
}

// endregion: --- Duration Resolver

// endregion: --- Tests
