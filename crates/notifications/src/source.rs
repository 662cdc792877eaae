//! Event sources feeding the background generator.

use ecole_config::NotificationConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entities::{NewNotification, NotificationKind, NotificationPriority};

/// Polled once per generator tick.
pub trait EventSource: Send {
    fn poll(&mut self) -> Option<NewNotification>;
}

/// Emits a low priority informational notification with a fixed chance per poll.
#[derive(Debug)]
pub struct RandomTrickle {
    rng: StdRng,
    probability: f64,
}

impl RandomTrickle {
    pub fn new(probability: f64, seed: Option<u64>) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { rng, probability }
    }

    pub fn from_config(config: &NotificationConfig) -> Self {
        Self::new(config.event_probability, config.rng_seed)
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl EventSource for RandomTrickle {
    fn poll(&mut self) -> Option<NewNotification> {
        if !self.rng.gen_bool(self.probability) {
            return None;
        }

        Some(NewNotification::new(
            "Nouvelle notification",
            "Ceci est une notification de test en temps réel",
            NotificationKind::Info,
            NotificationPriority::Low,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(source: &mut RandomTrickle, polls: usize) -> usize {
        (0..polls).filter(|_| source.poll().is_some()).count()
    }

    #[test]
    fn certain_and_impossible_probabilities() {
        assert_eq!(hits(&mut RandomTrickle::new(1.0, Some(1)), 50), 50);
        assert_eq!(hits(&mut RandomTrickle::new(0.0, Some(1)), 50), 0);
    }

    #[test]
    fn same_seed_produces_same_sequence() {
        let mut a = RandomTrickle::new(0.3, Some(99));
        let mut b = RandomTrickle::new(0.3, Some(99));

        let left: Vec<bool> = (0..100).map(|_| a.poll().is_some()).collect();
        let right: Vec<bool> = (0..100).map(|_| b.poll().is_some()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn out_of_range_probability_is_clamped() {
        assert_eq!(RandomTrickle::new(4.0, None).probability(), 1.0);
        assert_eq!(RandomTrickle::new(-1.0, None).probability(), 0.0);
        assert_eq!(RandomTrickle::new(f64::NAN, None).probability(), 0.0);
    }

    #[test]
    fn generated_notifications_are_low_priority_info() {
        let event = RandomTrickle::new(1.0, Some(3)).poll().unwrap();
        assert_eq!(event.kind, NotificationKind::Info);
        assert_eq!(event.priority, NotificationPriority::Low);
        assert!(!event.is_urgent());
    }
}
