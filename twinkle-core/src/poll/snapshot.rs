//! Latest values read from the input registers

use twinkle_protocol::{ButtonsView, SliderView};

/// Input state as of the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSnapshot {
    pub buttons: ButtonsView,
    pub turntable_p1: u8,
    pub turntable_p2: u8,
    pub volume_1_2: SliderView,
    pub volume_3_4: SliderView,
    pub volume_5: SliderView,
}

impl InputSnapshot {
    /// Volume slider by its panel number (1-5)
    pub fn volume(&self, slider: u8) -> Option<u8> {
        match slider {
            1 => Some(self.volume_1_2.first()),
            2 => Some(self.volume_1_2.second()),
            3 => Some(self.volume_3_4.first()),
            4 => Some(self.volume_3_4.second()),
            5 => Some(self.volume_5.first()),
            _ => None,
        }
    }

    /// All five sliders, slider 1 first
    pub fn volumes(&self) -> [u8; 5] {
        [
            self.volume_1_2.first(),
            self.volume_1_2.second(),
            self.volume_3_4.first(),
            self.volume_3_4.second(),
            self.volume_5.first(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinkle_protocol::RegisterView;

    #[test]
    fn test_volume_numbering() {
        let snapshot = InputSnapshot {
            volume_1_2: SliderView::from_raw(0x21),
            volume_3_4: SliderView::from_raw(0x43),
            volume_5: SliderView::from_raw(0x05),
            ..Default::default()
        };

        assert_eq!(snapshot.volumes(), [1, 2, 3, 4, 5]);
        assert_eq!(snapshot.volume(4), Some(4));
        assert_eq!(snapshot.volume(0), None);
        assert_eq!(snapshot.volume(6), None);
    }
}
