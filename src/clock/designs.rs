//! Presentation styles for the eight clock faces.

use egui::Color32;

/// How a design draws its digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitStyle {
    /// Each digit on its own rounded card
    Cards,
    /// Digits drawn as plain text
    Plain,
    /// Digits inside an outlined panel
    Outlined,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockDesign {
    pub id: u8,
    pub name: &'static str,
    pub digit_style: DigitStyle,
    pub monospace: bool,
    /// Digit height relative to the available height
    pub scale: f32,
    pub accent: Color32,
}

pub const DESIGNS: [ClockDesign; 8] = [
    ClockDesign {
        id: 1,
        name: "Flip",
        digit_style: DigitStyle::Cards,
        monospace: false,
        scale: 0.32,
        accent: Color32::from_rgb(236, 236, 240),
    },
    ClockDesign {
        id: 2,
        name: "Split Flip",
        digit_style: DigitStyle::Cards,
        monospace: true,
        scale: 0.28,
        accent: Color32::from_rgb(255, 183, 77),
    },
    ClockDesign {
        id: 3,
        name: "Flip Slim",
        digit_style: DigitStyle::Cards,
        monospace: false,
        scale: 0.24,
        accent: Color32::from_rgb(129, 212, 250),
    },
    ClockDesign {
        id: 4,
        name: "Flip Bold",
        digit_style: DigitStyle::Cards,
        monospace: true,
        scale: 0.36,
        accent: Color32::from_rgb(239, 83, 80),
    },
    ClockDesign {
        id: 5,
        name: "Retro LCD",
        digit_style: DigitStyle::Outlined,
        monospace: true,
        scale: 0.26,
        accent: Color32::from_rgb(156, 204, 101),
    },
    ClockDesign {
        id: 6,
        name: "Seven Segment",
        digit_style: DigitStyle::Plain,
        monospace: true,
        scale: 0.34,
        accent: Color32::from_rgb(255, 82, 82),
    },
    ClockDesign {
        id: 7,
        name: "Orbitron",
        digit_style: DigitStyle::Outlined,
        monospace: false,
        scale: 0.30,
        accent: Color32::from_rgb(0, 229, 255),
    },
    ClockDesign {
        id: 8,
        name: "Handwritten",
        digit_style: DigitStyle::Plain,
        monospace: false,
        scale: 0.38,
        accent: Color32::from_rgb(206, 147, 216),
    },
];

impl ClockDesign {
    /// Style for `design_id`, falling back to the first design
    pub fn for_id(design_id: u8) -> &'static ClockDesign {
        DESIGNS
            .iter()
            .find(|design| design.id == design_id)
            .unwrap_or(&DESIGNS[0])
    }
}
