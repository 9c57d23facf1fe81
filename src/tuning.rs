//! Tuning catalogue for stringed instruments.
//!
//! Pitches are MIDI note numbers ordered from the highest string to the
//! lowest. The first preset for each string count is that instrument's
//! standard tuning.

/// A named string tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    pub name: &'static str,
    pub is_standard: bool,
    pub tunings: &'static [i32],
}

const fn preset(name: &'static str, is_standard: bool, tunings: &'static [i32]) -> Tuning {
    Tuning { name, is_standard, tunings }
}

static PRESETS: &[Tuning] = &[
    // 7 strings
    preset("Guitar 7 strings", true, &[64, 59, 55, 50, 45, 40, 35]),
    preset("Guitar 7 strings Drop A", false, &[64, 59, 55, 50, 45, 40, 33]),
    // 6 strings
    preset("Guitar Standard Tuning", true, &[64, 59, 55, 50, 45, 40]),
    preset("Guitar Tune down ½ step", false, &[63, 58, 54, 49, 44, 39]),
    preset("Guitar Tune down 1 step", false, &[62, 57, 53, 48, 43, 38]),
    preset("Guitar Tune down 2 step", false, &[60, 55, 51, 46, 41, 36]),
    preset("Guitar Dropped D Tuning", false, &[64, 59, 55, 50, 45, 38]),
    preset("Guitar Dropped D Tuning variant", false, &[64, 57, 55, 50, 45, 38]),
    preset("Guitar Double Dropped D Tuning", false, &[62, 59, 55, 50, 45, 38]),
    preset("Guitar Dropped E", false, &[66, 61, 57, 52, 47, 40]),
    preset("Guitar Dropped C", false, &[62, 57, 53, 48, 43, 36]),
    preset("Guitar Open C", false, &[64, 60, 55, 48, 43, 36]),
    preset("Guitar Open Cm", false, &[63, 60, 55, 48, 43, 36]),
    preset("Guitar Open D", false, &[62, 57, 54, 50, 45, 38]),
    preset("Guitar Open Dm", false, &[62, 57, 53, 50, 45, 38]),
    preset("Guitar DADGAD", false, &[62, 57, 55, 50, 45, 38]),
    preset("Guitar Open E", false, &[64, 59, 56, 52, 47, 40]),
    preset("Guitar Open G", false, &[62, 59, 55, 50, 43, 38]),
    preset("Guitar Open Gm", false, &[62, 58, 55, 50, 43, 38]),
    preset("Guitar Open A", false, &[64, 61, 57, 52, 45, 40]),
    // 5 strings
    preset("Bass 5 Strings Tuning", true, &[43, 38, 33, 28, 23]),
    preset("Tenor Bass 5 Strings Tuning", false, &[48, 43, 38, 33, 28]),
    preset("Bass 5 Strings Tune down 1 step", false, &[41, 36, 31, 26, 21]),
    // 4 strings
    preset("Bass Standard Tuning", true, &[43, 38, 33, 28]),
    preset("Bass Tune down ½ step", false, &[42, 37, 32, 27]),
    preset("Bass Tune down 1 step", false, &[41, 36, 31, 26]),
    preset("Bass Dropped D Tuning", false, &[43, 38, 33, 26]),
    preset("Ukulele C Tuning", false, &[69, 64, 60, 67]),
    preset("Ukulele D Tuning", false, &[71, 66, 62, 69]),
];

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// All presets with the given number of strings, standard tuning first.
pub fn presets_for(string_count: usize) -> impl Iterator<Item = &'static Tuning> {
    PRESETS.iter().filter(move |t| t.tunings.len() == string_count)
}

/// Find the preset matching `strings` exactly, if any.
pub fn find_tuning(strings: &[i32]) -> Option<&'static Tuning> {
    presets_for(strings.len()).find(|t| t.tunings == strings)
}

/// Note name of a MIDI pitch, e.g. `E` or `E4`.
pub fn text_for_tuning(pitch: i32, include_octave: bool) -> String {
    let name = NOTE_NAMES[pitch.rem_euclid(12) as usize];
    if include_octave {
        let octave = pitch.div_euclid(12) - 1;
        format!("{name}{octave}")
    } else {
        name.to_string()
    }
}
