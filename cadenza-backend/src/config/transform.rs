use educe::Educe;
use serde::{Deserialize, Serialize};

/// Semitone offsets of the generated harmony parts, measured from the soprano.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Educe)]
#[educe(Default)]
pub struct Harmony {
    #[educe(Default(expression = 4))]
    pub alto: i32,
    #[educe(Default(expression = -5))]
    pub tenor: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Educe)]
#[educe(Default)]
pub struct Lyrics {
    #[educe(Default(expression = 50))]
    pub width: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Educe)]
#[educe(Default)]
pub struct Transform {
    // decimal digits kept in the tempo ratio
    #[educe(Default(expression = 4))]
    pub tempo_precision: u32,
    pub harmony: Harmony,
    pub lyrics: Lyrics,
}
