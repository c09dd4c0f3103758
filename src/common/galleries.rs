//! # Cover Gallery Themes
//!
//! Fixed table of believable gallery themes used as cover traffic around the
//! flag image, plus a small generator for throwaway gallery descriptions.
//! The table is immutable static data; callers pick entries through
//! [`random_theme`] rather than touching shared mutable state.

use rand::seq::SliceRandom;
use rand::Rng;

/// A cover gallery: a description and the image file names uploaded with it.
#[derive(Debug, Clone, Copy)]
pub struct GalleryTheme {
    /// Cover story shown as the gallery description.
    pub description: &'static str,
    /// File names of the cover images uploaded into the gallery.
    pub image_names: &'static [&'static str],
}

/// The fixed set of cover themes. Descriptions are deliberately chatty so a
/// flag gallery blends in with player-created ones.
pub static GALLERY_THEMES: &[GalleryTheme] = &[
    GalleryTheme {
        description: "Hey party people! Do you remember what Michael did during that crazy night, \
                      when we were out?!? I just found some pictures on my iPhone that I can't even \
                      remember having taken... Don't tease him too much, OK? ;)",
        image_names: &[
            "2020-10-09_22-46-01_fun1.jpg",
            "2020-10-09_23-15-27_fun2.jpg",
            "2020-10-10_14-22-33_recovery.jpg",
        ],
    },
    GalleryTheme {
        description: "Welcome folks! Here, I share with you a collection of the wonderful places I \
                      have been during my trip around the world. Be ready to be struck with awe!",
        image_names: &[
            "2017-09-06_19-46-25_rainbow.jpg",
            "2020-09-01_18-02-56_view.jpg",
            "2020-10-09_10-06-53_tree-house.jpg",
        ],
    },
    GalleryTheme {
        description: "The sun, a perfect beach, and the sound of waves... Is there anything better \
                      to relax than this combination? Ok, add a chilled glass of Mojito and you \
                      don't remember what the word 'stress' means.",
        image_names: &[
            "2018-04-18_16-59-33_beach.jpg",
            "2021-07-11_12-56-14_beach.jpg",
            "2021-09-05_11-15-33_beach.jpg",
            "2022-07-28_12-24-13_beach.jpg",
        ],
    },
    GalleryTheme {
        description: "The best thing about traveling is that one sees so many wonderous places, \
                      which leave you wondering: 'How can this be possible?' Here is a small \
                      selection of crazy locations I have seen.",
        image_names: &[
            "2016-03-15_21-34-03_minecraft_cave.jpg",
            "2021-04-06_14-54-07_waterfall.jpg",
            "2022-03-18_14-22-07_bridge.jpg",
            "2023-02-28_15-32-12_wicked-trees.jpg",
        ],
    },
    GalleryTheme {
        description: "Do you know what is my highlight when traveling? All the awesome airplanes \
                      you get to see and board. I don't care if it's an Airbus, Boeing, or \
                      Bombardier. As long as it has wings, jets, landing gear and enough power to \
                      glide through the air, I am hooked. Send me an email and ask for the password \
                      if you are a plane nerd like me! :)",
        image_names: &[
            "2017-02-13_15-05-23_onboard.jpg",
            "2019-12-03_18-46-39_boarding.jpg",
            "2022-06-23_13-48-09_landing.jpg",
            "2023-01-02_08-07-27_takeoff.jpg",
        ],
    },
];

/// Pick a cover theme by uniform random index.
pub fn random_theme() -> &'static GalleryTheme {
    let mut rng = rand::thread_rng();
    &GALLERY_THEMES[rng.gen_range(0..GALLERY_THEMES.len())]
}

const OPENERS: &[&str] = &[
    "Hello everyone!",
    "Hey there!",
    "Welcome to my little corner of the web!",
    "Finally got around to sorting my photos.",
    "Greetings, fellow travelers!",
];

const SUBJECTS: &[&str] = &[
    "a weekend trip",
    "our summer vacation",
    "a spontaneous road trip",
    "my birthday party",
    "a long hike",
    "a family reunion",
];

const PLACES: &[&str] = &[
    "at the coast",
    "in the mountains",
    "in the old town",
    "by the lake",
    "somewhere I won't disclose",
    "right around the corner",
];

const CLOSERS: &[&str] = &[
    "Enjoy the pictures!",
    "More to come soon.",
    "Don't forget to leave a comment!",
    "Hope you like them as much as I do.",
    "No reposting, please!",
];

/// Generate a short filler description for a throwaway gallery.
///
/// Purely cosmetic traffic: the functional check needs a plausible
/// description, not a meaningful one.
pub fn random_description() -> String {
    let mut rng = rand::thread_rng();
    // SliceRandom::choose only returns None on empty slices
    let opener = OPENERS.choose(&mut rng).unwrap_or(&OPENERS[0]);
    let subject = SUBJECTS.choose(&mut rng).unwrap_or(&SUBJECTS[0]);
    let place = PLACES.choose(&mut rng).unwrap_or(&PLACES[0]);
    let closer = CLOSERS.choose(&mut rng).unwrap_or(&CLOSERS[0]);
    format!("{} Some impressions of {} {}. {}", opener, subject, place, closer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_theme_has_covers() {
        assert_eq!(GALLERY_THEMES.len(), 5);
        for theme in GALLERY_THEMES {
            assert!(!theme.description.is_empty());
            assert!(theme.image_names.len() >= 3);
        }
    }

    #[test]
    fn random_theme_comes_from_the_table() {
        let theme = random_theme();
        assert!(GALLERY_THEMES
            .iter()
            .any(|t| std::ptr::eq(t.description, theme.description)));
    }

    #[test]
    fn descriptions_are_nonempty_sentences() {
        for _ in 0..20 {
            let description = random_description();
            assert!(description.len() > 20);
            assert!(description.contains(' '));
        }
    }
}
