//! Embedded sprite sheet
//!
//! All game art is ASCII-art patterns compiled into the binary and
//! rasterized once at startup. A bad pattern fails the whole load.

use std::rc::Rc;

use crate::consts::SCREEN_WIDTH;
use crate::entity::Image;
use crate::sprite::{Color, Sprite, SpriteError};

/// Pattern cell size in pixels
pub const PIXEL_SCALE: i32 = 4;

/// Track tile width (two tiles leapfrog across the screen)
pub const TRACK_TILE_WIDTH: i32 = SCREEN_WIDTH + 100;
pub const TRACK_TILE_HEIGHT: i32 = 12;

const PALETTE: &[(char, Color)] = &[
    ('g', Color::rgb(104, 173, 62)),
    ('d', Color::rgb(71, 96, 50)),
    ('r', Color::rgb(200, 64, 64)),
    ('k', Color::rgb(20, 20, 20)),
    ('w', Color::rgb(250, 250, 250)),
    ('s', Color::rgb(232, 190, 150)),
    ('b', Color::rgb(60, 90, 170)),
    ('y', Color::rgb(220, 180, 40)),
    ('p', Color::rgb(150, 70, 150)),
    ('n', Color::rgb(90, 60, 40)),
    ('c', Color::rgb(120, 200, 230)),
    ('l', Color::rgb(200, 200, 200)),
    ('m', Color::rgb(150, 150, 150)),
];

const CORONA_IDLE: &str = "
    .....rr.....
    ..r..dd..r..
    ...dggggd...
    ..dggggggd..
    .dggkggkggd.
    rdggkggkggdr
    .dggggggggd.
    .dgggddgggd.
    ..dggggggd..
    ...dggggd...
    ..r.dddd.r..
    ....d..d....
    ....d..d....
    ....d..d....
    ...dd..dd...
";

const CORONA_RUN_1: &str = "
    .....rr.....
    ..r..dd..r..
    ...dggggd...
    ..dggggggd..
    .dggggkggkd.
    rdggggkggkdr
    .dggggggggd.
    .dgggggddgd.
    ..dggggggd..
    ...dggggd...
    ..r.dddd.r..
    ....d..d....
    ...d....d...
    ..d......d..
    .dd.....dd..
";

const CORONA_RUN_2: &str = "
    .....rr.....
    ..r..dd..r..
    ...dggggd...
    ..dggggggd..
    .dggggkggkd.
    rdggggkggkdr
    .dggggggggd.
    .dgggggddgd.
    ..dggggggd..
    ...dggggd...
    ..r.dddd.r..
    ....d..d....
    ....d.d.....
    .....dd.....
    ....dd......
";

const CORONA_JUMP: &str = "
    .....rr.....
    ..r..dd..r..
    ...dggggd...
    ..dggggggd..
    .dggggkggkd.
    rdggggkggkdr
    .dggggggggd.
    .dggggdddgd.
    ..dggggggd..
    ...dggggd...
    ..r.dddd.r..
    ...d....d...
    ...dd..dd...
    ............
    ............
";

const CORONA_DEAD: &str = "
    .....rr.....
    ..r..dd..r..
    ...dggggd...
    ..dggggggd..
    .dgkgkgkgkd.
    rdggkggkggdr
    .dgkgkgkgkd.
    .dggggggggd.
    ..dgdddddd..
    ...dggggd...
    ..r.dddd.r..
    ....d..d....
    ....d..d....
    ....d..d....
    ...dd..dd...
";

const CORONA_DUCK_1: &str = "
    ....r.....rr...
    ..r..dgggggd.r.
    ...dgggggggkgd.
    .rdggggggggkggr
    ..dgggggggggggd
    ...dggggggggdd.
    ....d..d..d....
    ...dd.dd..dd...
";

const CORONA_DUCK_2: &str = "
    ....r.....rr...
    ..r..dgggggd.r.
    ...dgggggggkgd.
    .rdggggggggkggr
    ..dgggggggggggd
    ...dggggggggdd.
    .....d..d.d....
    ....dd.dd.dd...
";

const SMALL_HUMAN_1: &str = "
    ..nnnn..
    ..ssss..
    ..sksk..
    ..ssss..
    .bbbbbb.
    sbbbbbbs
    s.bbbb.s
    ..bbbb..
    ..k..k..
    ..k..k..
    .kk..kk.
";

const SMALL_HUMAN_2: &str = "
    ..yyyy..
    ..ssss..
    ..ksks..
    ..ssss..
    .pppppp.
    spppppps
    s.pppp.s
    ..pppp..
    ..k..k..
    ..k..k..
    .kk..kk.
";

const SMALL_HUMAN_3: &str = "
    .nnnnnn.
    ..ssss..
    ..sksk..
    ..swws..
    .rrrrrr.
    srrrrrrs
    s.rrrr.s
    ..bbbb..
    ..b..b..
    ..k..k..
    .kk..kk.
";

const BIG_HUMAN_1: &str = "
    ...nnnn...
    ..nnnnnn..
    ..ssssss..
    ..sksssk..
    ..ssssss..
    ..swwwws..
    ...ssss...
    .bbbbbbbb.
    bbbbbbbbbb
    sbbbbbbbbs
    sbbbbbbbbs
    s.bbbbbb.s
    ..kkkkkk..
    ..kk..kk..
    ..kk..kk..
    ..kk..kk..
    ..kk..kk..
    .kkk..kkk.
";

const BIG_HUMAN_2: &str = "
    ...yyyy...
    ..yyyyyy..
    ..ssssss..
    ..skssks..
    ..ssssss..
    ..sswwss..
    ...ssss...
    .gggggggg.
    gggggggggg
    sggggggggs
    sggggggggs
    s.gggggg.s
    ..bbbbbb..
    ..bb..bb..
    ..bb..bb..
    ..bb..bb..
    ..bb..bb..
    .kkk..kkk.
";

const BIG_HUMAN_3: &str = "
    ..........
    ...kkkk...
    ..ssssss..
    ..sksssk..
    ..ssssss..
    ..lllllls.
    ..lllllls.
    .pppppppp.
    pppppppppp
    spppppppps
    spppppppps
    s.pppppp.s
    ..nnnnnn..
    ..nn..nn..
    ..nn..nn..
    ..nn..nn..
    ..nn..nn..
    .kkk..kkk.
";

const VACCINE_1: &str = "
    ......ll........
    ....llllll......
    ......ll........
    ..m...ll........
    .mmmccccccccm...
    mmmmccccccccmmmm
    mmmmccccccccmmmm
    .mmmccccccccm...
    ..m...ll........
    ......ll........
    ....llllll......
    ......ll........
";

const VACCINE_2: &str = "
    ................
    ......ll........
    ....llllll......
    ..m...ll........
    .mmmccccccccm...
    mmmmccccccccmmmm
    mmmmccccccccmmmm
    .mmmccccccccm...
    ..m...ll........
    ....llllll......
    ......ll........
    ................
";

const CLOUD: &str = "
    ........llll........
    ....lllllllllll.....
    ..llllllllllllllll..
    .llllllllllllllllll.
    llllllllllllllllllll
    ..mmmmmmmmmmmmmmmm..
";

const RESTART: &str = "
    ..kkkkk..
    .kk...kkk
    kk.....kk
    kk...kkkk
    kk.......
    kk.....kk
    .kk...kk.
    ..kkkkk..
";

/// Character poses
#[derive(Debug, Clone)]
pub struct CharacterSprites {
    pub idle: Image,
    pub run: [Image; 2],
    pub jump: Image,
    pub duck: [Image; 2],
    pub dead: Image,
}

/// Obstacle variants
#[derive(Debug, Clone)]
pub struct ObstacleSprites {
    pub small_humans: [Image; 3],
    pub big_humans: [Image; 3],
    pub vaccine: [Image; 2],
}

/// Every image the game draws
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub character: CharacterSprites,
    pub obstacles: ObstacleSprites,
    pub cloud: Image,
    pub track: Image,
    pub restart: Image,
}

impl SpriteSheet {
    /// Rasterize all embedded patterns
    pub fn load() -> Result<Self, SpriteError> {
        let sheet = Self {
            character: CharacterSprites {
                idle: pattern("corona", CORONA_IDLE)?,
                run: [
                    pattern("corona_run_1", CORONA_RUN_1)?,
                    pattern("corona_run_2", CORONA_RUN_2)?,
                ],
                jump: pattern("corona_jump", CORONA_JUMP)?,
                duck: [
                    pattern("corona_duck_1", CORONA_DUCK_1)?,
                    pattern("corona_duck_2", CORONA_DUCK_2)?,
                ],
                dead: pattern("corona_dead", CORONA_DEAD)?,
            },
            obstacles: ObstacleSprites {
                small_humans: [
                    pattern("small_human_1", SMALL_HUMAN_1)?,
                    pattern("small_human_2", SMALL_HUMAN_2)?,
                    pattern("small_human_3", SMALL_HUMAN_3)?,
                ],
                big_humans: [
                    pattern("big_human_1", BIG_HUMAN_1)?,
                    pattern("big_human_2", BIG_HUMAN_2)?,
                    pattern("big_human_3", BIG_HUMAN_3)?,
                ],
                vaccine: [
                    pattern("vaccine_1", VACCINE_1)?,
                    pattern("vaccine_2", VACCINE_2)?,
                ],
            },
            cloud: pattern("cloud", CLOUD)?,
            track: Rc::new(track_tile()),
            restart: pattern("restart", RESTART)?,
        };
        log::info!("Sprite sheet loaded");
        Ok(sheet)
    }
}

fn pattern(name: &str, art: &str) -> Result<Image, SpriteError> {
    Sprite::from_pattern(name, art, PALETTE, PIXEL_SCALE).map(Rc::new)
}

/// Ground line with scattered pebbles
fn track_tile() -> Sprite {
    let ground = Color::rgb(83, 83, 83);
    Sprite::from_fn("track", TRACK_TILE_WIDTH, TRACK_TILE_HEIGHT, |x, y| {
        if y < 2 {
            return ground;
        }
        // Cheap positional hash for pebble placement
        let h = (x as u32).wrapping_mul(2654435761) ^ (y as u32).wrapping_mul(40503);
        if h % 97 == 0 { ground } else { Color::TRANSPARENT }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DUCK_Y, GROUND_Y, TRACK_Y};

    #[test]
    fn test_sheet_loads() {
        assert!(SpriteSheet::load().is_ok());
    }

    #[test]
    fn test_character_stands_on_track() {
        let sheet = SpriteSheet::load().unwrap();
        let c = &sheet.character;
        assert_eq!(GROUND_Y + c.idle.height(), TRACK_Y);
        assert_eq!(GROUND_Y + c.run[0].height(), TRACK_Y);
        assert_eq!(DUCK_Y + c.duck[0].height(), TRACK_Y);
    }

    #[test]
    fn test_poses_differ() {
        let sheet = SpriteSheet::load().unwrap();
        let c = &sheet.character;
        assert_ne!(c.run[0].mask(), c.run[1].mask());
        assert_ne!(c.duck[0].mask(), c.duck[1].mask());
        assert_ne!(sheet.obstacles.vaccine[0].mask(), sheet.obstacles.vaccine[1].mask());
    }

    #[test]
    fn test_track_tile_has_ground_line() {
        let sheet = SpriteSheet::load().unwrap();
        assert_eq!(sheet.track.width(), TRACK_TILE_WIDTH);
        assert!(sheet.track.pixel(0, 0).is_opaque());
        assert!(sheet.track.pixel(TRACK_TILE_WIDTH - 1, 1).is_opaque());
    }
}
