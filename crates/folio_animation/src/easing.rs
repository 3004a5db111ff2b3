//! Easing curves
//!
//! Easings are named the way page scripts name them: a family, an optional
//! mode and optional parameters, e.g. `power3.out`, `power2.inOut`,
//! `elastic.out(1, 0.5)`, `back.out(1.7)`, `none`.

use std::f32::consts::{FRAC_PI_2, TAU};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which end of the curve the easing applies to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EaseMode {
    In,
    #[default]
    Out,
    InOut,
}

impl EaseMode {
    fn as_str(self) -> &'static str {
        match self {
            EaseMode::In => "in",
            EaseMode::Out => "out",
            EaseMode::InOut => "inOut",
        }
    }
}

/// An easing curve mapping linear progress (0.0 to 1.0) to eased progress
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    Linear,
    /// Polynomial easing; `power1` is quadratic, `power4` quintic
    Power { power: u8, mode: EaseMode },
    Sine(EaseMode),
    /// Overshoot before settling
    Back { mode: EaseMode, overshoot: f32 },
    /// Damped oscillation around the end value
    Elastic {
        mode: EaseMode,
        amplitude: f32,
        period: f32,
    },
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Power {
            power: 1,
            mode: EaseMode::Out,
        }
    }
}

impl Easing {
    pub const fn power(power: u8, mode: EaseMode) -> Self {
        Easing::Power { power, mode }
    }

    pub const fn power2_out() -> Self {
        Self::power(2, EaseMode::Out)
    }

    pub const fn power2_in_out() -> Self {
        Self::power(2, EaseMode::InOut)
    }

    pub const fn power3_out() -> Self {
        Self::power(3, EaseMode::Out)
    }

    pub const fn elastic_out(amplitude: f32, period: f32) -> Self {
        Easing::Elastic {
            mode: EaseMode::Out,
            amplitude,
            period,
        }
    }

    /// Apply the easing to progress `t` (clamped to 0.0..=1.0)
    ///
    /// The endpoints are exact: `apply(0.0) == 0.0` and `apply(1.0) == 1.0`.
    /// Intermediate values may leave 0..1 for back and elastic curves.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match *self {
            Easing::Linear => t,
            Easing::Power { power, mode } => {
                let exponent = i32::from(power) + 1;
                with_mode(mode, t, |t| t.powi(exponent))
            }
            Easing::Sine(mode) => with_mode(mode, t, |t| 1.0 - (t * FRAC_PI_2).cos()),
            Easing::Back { mode, overshoot } => {
                with_mode(mode, t, |t| t * t * ((overshoot + 1.0) * t - overshoot))
            }
            Easing::Elastic {
                mode,
                amplitude,
                period,
            } => {
                let amplitude_factor = amplitude.max(1.0);
                let period = period / amplitude.clamp(f32::EPSILON, 1.0);
                let phase = period / TAU * (1.0 / amplitude_factor).asin();
                let ease_out = |t: f32| {
                    amplitude_factor
                        * 2f32.powf(-10.0 * t)
                        * ((t - phase) * TAU / period).sin()
                        + 1.0
                };
                match mode {
                    EaseMode::Out => ease_out(t),
                    EaseMode::In => 1.0 - ease_out(1.0 - t),
                    EaseMode::InOut => {
                        if t < 0.5 {
                            (1.0 - ease_out(1.0 - 2.0 * t)) * 0.5
                        } else {
                            ease_out(2.0 * t - 1.0) * 0.5 + 0.5
                        }
                    }
                }
            }
        }
    }
}

/// Derive the out/inOut variants from an ease-in curve
fn with_mode(mode: EaseMode, t: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    match mode {
        EaseMode::In => ease_in(t),
        EaseMode::Out => 1.0 - ease_in(1.0 - t),
        EaseMode::InOut => {
            if t < 0.5 {
                ease_in(t * 2.0) * 0.5
            } else {
                1.0 - ease_in((1.0 - t) * 2.0) * 0.5
            }
        }
    }
}

/// Error for an unrecognised easing identifier
#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown easing `{0}`")]
pub struct EasingParseError(pub String);

impl FromStr for Easing {
    type Err = EasingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || EasingParseError(s.to_string());
        let trimmed = s.trim();

        let (name, params) = match trimmed.find('(') {
            Some(open) => {
                let close = trimmed.rfind(')').filter(|&c| c > open).ok_or_else(err)?;
                let params = trimmed[open + 1..close]
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(|p| p.parse::<f32>().map_err(|_| err()))
                    .collect::<Result<Vec<_>, _>>()?;
                (&trimmed[..open], params)
            }
            None => (trimmed, Vec::new()),
        };

        let (family, mode) = match name.split_once('.') {
            Some((family, mode)) => {
                let mode = match mode {
                    "in" => EaseMode::In,
                    "out" => EaseMode::Out,
                    "inOut" => EaseMode::InOut,
                    _ => return Err(err()),
                };
                (family, mode)
            }
            None => (name, EaseMode::Out),
        };

        match family {
            "none" | "linear" | "power0" => Ok(Easing::Linear),
            "power1" | "power2" | "power3" | "power4" => {
                let power = family[5..].parse().map_err(|_| err())?;
                Ok(Easing::Power { power, mode })
            }
            "quad" => Ok(Easing::Power { power: 1, mode }),
            "cubic" => Ok(Easing::Power { power: 2, mode }),
            "quart" => Ok(Easing::Power { power: 3, mode }),
            "quint" | "strong" => Ok(Easing::Power { power: 4, mode }),
            "sine" => Ok(Easing::Sine(mode)),
            "back" => Ok(Easing::Back {
                mode,
                overshoot: params.first().copied().unwrap_or(1.70158),
            }),
            "elastic" => Ok(Easing::Elastic {
                mode,
                amplitude: params.first().copied().unwrap_or(1.0),
                period: params.get(1).copied().unwrap_or(match mode {
                    EaseMode::InOut => 0.45,
                    _ => 0.3,
                }),
            }),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("none"),
            Easing::Power { power, mode } => write!(f, "power{}.{}", power, mode.as_str()),
            Easing::Sine(mode) => write!(f, "sine.{}", mode.as_str()),
            Easing::Back { mode, overshoot } => write!(f, "back.{}({})", mode.as_str(), overshoot),
            Easing::Elastic {
                mode,
                amplitude,
                period,
            } => write!(f, "elastic.{}({}, {})", mode.as_str(), amplitude, period),
        }
    }
}

impl TryFrom<String> for Easing {
    type Error = EasingParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [&str; 8] = [
        "none",
        "power1.in",
        "power2.inOut",
        "power3.out",
        "sine.inOut",
        "back.out(1.7)",
        "elastic.out(1, 0.5)",
        "elastic.inOut",
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for name in ALL {
            let easing: Easing = name.parse().unwrap();
            assert_eq!(easing.apply(0.0), 0.0, "{name} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{name} at 1");
        }
    }

    #[test]
    fn test_parse_modes_and_params() {
        assert_eq!("power3.out".parse::<Easing>(), Ok(Easing::power3_out()));
        assert_eq!("power2".parse::<Easing>(), Ok(Easing::power(2, EaseMode::Out)));
        assert_eq!("none".parse::<Easing>(), Ok(Easing::Linear));
        assert_eq!("elastic.out(1, 0.5)".parse::<Easing>(), Ok(Easing::elastic_out(1.0, 0.5)));
        assert!("power9.out".parse::<Easing>().is_err());
        assert!("power2.sideways".parse::<Easing>().is_err());
        assert!("elastic.out(1, x)".parse::<Easing>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for name in ALL {
            let easing: Easing = name.parse().unwrap();
            let reparsed: Easing = easing.to_string().parse().unwrap();
            assert_eq!(easing, reparsed);
        }
    }

    #[test]
    fn test_power_out_is_front_loaded() {
        let easing = Easing::power3_out();
        assert!(easing.apply(0.5) > 0.5);
        assert!(Easing::power(3, EaseMode::In).apply(0.5) < 0.5);
        assert!((Easing::power2_in_out().apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_power_curves_are_monotonic() {
        for easing in [Easing::power2_out(), Easing::power2_in_out(), Easing::Linear] {
            let mut last = 0.0;
            for i in 0..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v >= last);
                last = v;
            }
        }
    }

    #[test]
    fn test_elastic_overshoots() {
        let easing = Easing::elastic_out(1.0, 0.5);
        let peak = (1..100)
            .map(|i| easing.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_sine_in_out_matches_closed_form() {
        let easing = Easing::Sine(EaseMode::InOut);
        for i in 1..10 {
            let t = i as f32 / 10.0;
            let closed_form = -((std::f32::consts::PI * t).cos() - 1.0) / 2.0;
            assert!((easing.apply(t) - closed_form).abs() < 1e-5);
        }
    }
}
