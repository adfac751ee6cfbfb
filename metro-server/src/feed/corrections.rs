//! Manual fixes for gaps and errors in the upstream feed.
//!
//! Some lines are missing from the feed or listed incompletely; those are
//! replaced wholesale with [`fallback_line`] data. Other lines are mostly
//! right but carry wrong positions, or ids that should match the
//! interchange record on another line, at known indices. Those are patched
//! in place by [`apply`].

use std::collections::HashMap;

use crate::network::RawStation;

/// `(id, name, latitude, longitude, order)`
type FallbackStation = (i64, &'static str, &'static str, &'static str, u32);

/// A positional fix to one feed record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Patch {
    pub line: &'static str,
    /// Position of the record in the feed's list for `line`.
    pub index: usize,
    /// Replacement id, when the record should join another line's node.
    pub id: Option<i64>,
    pub latitude: &'static str,
    pub longitude: &'static str,
}

/// Fixes applied to feed data, skipped when the feed list is too short.
pub const PATCHES: &[Patch] = &[
    Patch {
        line: "M8",
        index: 10,
        id: Some(135),
        latitude: "41.01544045560607",
        longitude: "29.16244635386456",
    },
    Patch {
        line: "M8",
        index: 3,
        id: Some(7),
        latitude: "40.9748528607554",
        longitude: "29.099330474424526",
    },
    Patch {
        line: "M7",
        index: 2,
        id: Some(26),
        latitude: "41.0645069127",
        longitude: "28.9926697578",
    },
    Patch {
        line: "M7",
        index: 8,
        id: None,
        latitude: "41.0799901",
        longitude: "28.9352699",
    },
    Patch {
        line: "M7",
        index: 9,
        id: None,
        latitude: "41.0796898",
        longitude: "28.9295594",
    },
    Patch {
        line: "T1",
        index: 25,
        id: Some(330),
        latitude: "41.015180",
        longitude: "28.975890",
    },
    Patch {
        line: "T5",
        index: 0,
        id: Some(78),
        latitude: "41.0174770208",
        longitude: "28.9732097738",
    },
    Patch {
        line: "T5",
        index: 12,
        id: Some(150),
        latitude: "41.0791702",
        longitude: "28.9493602",
    },
    Patch {
        line: "M6",
        index: 0,
        id: Some(28),
        latitude: "41.0767734293",
        longitude: "29.0136876237",
    },
    Patch {
        line: "M9",
        index: 2,
        id: Some(40),
        latitude: "41.0724333906",
        longitude: "28.8023285305",
    },
    Patch {
        line: "T4",
        index: 7,
        id: Some(156),
        latitude: "41.0815994",
        longitude: "28.8754204",
    },
    Patch {
        line: "T4",
        index: 19,
        id: Some(207),
        latitude: "41.0240250582",
        longitude: "28.9305034257",
    },
    Patch {
        line: "T4",
        index: 21,
        id: Some(65),
        latitude: "41.0192295429",
        longitude: "28.9194470285",
    },
    Patch {
        line: "F1",
        index: 0,
        id: Some(82),
        latitude: "41.034195",
        longitude: "28.992712",
    },
    Patch {
        line: "F1",
        index: 1,
        id: Some(24),
        latitude: "41.038496",
        longitude: "28.985783",
    },
    Patch {
        line: "F4",
        index: 1,
        id: Some(141),
        latitude: "41.085278",
        longitude: "29.045519",
    },
];

/// Lines whose feed data is replaced entirely.
pub const REPLACED_LINES: &[&str] = &["MM", "M3", "M1B", "M1A"];

/// Full station list for a line the feed cannot be trusted for.
pub fn fallback_line(code: &str) -> Option<Vec<RawStation>> {
    let stations = match code {
        "MM" => MARMARAY,
        "M3" => M3,
        "M1B" => M1B,
        "M1A" => M1A,
        _ => return None,
    };
    Some(
        stations
            .iter()
            .map(|&(id, name, lat, lon, order)| RawStation::new(id, name, lat, lon, code, order))
            .collect(),
    )
}

/// Apply fallback lines and positional patches to per-line feed data.
///
/// Lines in [`REPLACED_LINES`] are overwritten (or created). Patches only
/// touch records that exist.
pub fn apply(lines: &mut HashMap<String, Vec<RawStation>>) {
    for code in REPLACED_LINES {
        if let Some(stations) = fallback_line(code) {
            lines.insert((*code).to_string(), stations);
        }
    }

    for patch in PATCHES {
        let Some(station) = lines
            .get_mut(patch.line)
            .and_then(|stations| stations.get_mut(patch.index))
        else {
            continue;
        };
        station.latitude = patch.latitude.to_string();
        station.longitude = patch.longitude.to_string();
        if let Some(id) = patch.id {
            station.id = id;
        }
    }
}

const MARMARAY: &[FallbackStation] = &[
    (301, "GEBZE", "40.784181", "29.3935358", 1),
    (302, "DARICA", "40.78982", "29.3895205", 2),
    (303, "OSMANGAZI", "40.7986566", "29.3782534", 3),
    (304, "GEBZE_TEKNIK_ÜNIVERSITESI", "40.8082463", "29.3594667", 4),
    (305, "CAYIROVA", "40.8107955", "29.3465654", 5),
    (306, "TUZLA", "40.8290353", "29.3207176", 6),
    (307, "ICMELER", "40.8455518", "29.2998963", 7),
    (308, "AYDINTEPE", "40.8508856", "29.295064", 8),
    (309, "GUZELYALI", "40.8561729", "29.2860626", 9),
    (310, "TERSANE", "40.8598315", "29.2747476", 10),
    (311, "KAYNARCA", "40.8705039", "29.2558612", 11),
    (312, "PENDIK", "40.8806883", "29.2316707", 12),
    (313, "YUNUS", "40.8834551", "29.2091668", 13),
    (314, "KARTAL", "40.8870486", "29.1851243", 14),
    (315, "BASAK", "40.891103", "29.1752967", 15),
    (316, "ATALAR", "40.8981152", "29.1674154", 16),
    (317, "CEVIZLI", "40.9082929", "29.155834", 17),
    (318, "MALTEPE", "40.9198759", "29.1308588", 18),
    (319, "SUREYYA_PLAJI", "40.9261565", "29.1197238", 19),
    (320, "IDEALTEPE", "40.9383674", "29.1099494", 20),
    (321, "KUUCKYALI", "40.9439545", "29.1057246", 21),
    (161, "BOSTANCI", "40.95128998347687", "29.097243057130374", 22),
    (323, "SUADIYE", "40.9587123", "29.0850411", 23),
    (324, "ERENKOY", "40.9703631", "29.0736159", 24),
    (325, "GOZTEPE", "40.9782839", "29.0594758", 25),
    (326, "FENERYOLU", "40.9767792", "29.0465906", 26),
    (327, "SOGUTLUCESME", "40.9925862", "29.0333966", 27),
    (2, "AYRILIK_CESMESI", "41.00020434433358", "29.030153258203203", 28),
    (122, "USKUDAR", "41.025618259645256", "29.015061927581854", 29),
    (330, "SIRKECI", "41.015180", "28.975890", 30),
    (20, "YENIKAPI", "41.0055971704", "28.9513306172", 31),
    (332, "KAZLICESME", "40.9920031", "28.9166025", 32),
    (333, "ZEYTINBURNU", "40.9866357", "28.9045622", 33),
    (334, "YENIMAHALLE", "40.9817211", "28.8824225", 34),
    (335, "BAKIRKOY", "40.9815344", "28.8734009", 35),
    (336, "ATAKOY", "40.9794168", "28.8555328", 36),
    (337, "YESILYURT", "40.9630548", "28.830968", 37),
    (338, "YESILKOY", "40.9627362", "28.8247946", 38),
    (339, "FLORYA_AKVARUM", "40.96556", "28.7983628", 39),
    (340, "FLORYA", "40.9715111", "28.790156", 40),
    (341, "KUCUKCEKMECE", "40.98784", "28.773917", 41),
    (342, "MUSTAFA_KEMAL", "41.0028258", "28.7656428", 42),
    (343, "HALKALI", "41.0167685", "28.7682746", 43),
];

const M3: &[FallbackStation] = &[
    (240, "KAYASEHIR MERKEZ", "41.1183031", "28.7655255", 13),
    (239, "TOPLU KONUTLAR", "41.1068062", "28.767267", 12),
    (238, "SEHIR HASTANESI", "41.1031843", "28.7762591", 11),
    (237, "ONURKENT", "41.1133997", "28.7905842", 10),
    (36, "METROKENT", "41.1075899254", "28.8014768347", 9),
    (37, "BASAK KONUTLARI", "41.0976705948", "28.7912824671", 8),
    (38, "SITELER", "41.0882027223", "28.7965104065", 7),
    (39, "TURGUT OZAL", "41.0811852568", "28.7974049311", 6),
    (40, "IKITELLI SANAYI", "41.0724333906", "28.8023285305", 5),
    (41, "ISTOC", "41.0649996532", "28.8259591715", 4),
    (160, "MAHMUTBEY", "41.054312", "28.830612", 3),
    (43, "YENIMAHALLE", "41.0403571945", "28.8359378583", 2),
    (44, "KIRAZLI", "41.0322960516", "28.8427689525", 1),
];

const M1B: &[FallbackStation] = &[
    (44, "KIRAZLI", "41.0322960516", "28.8427689525", 1),
    (48, "BAGCILAR MEYDAN", "41.0345164689", "28.8561714937", 2),
    (49, "UCYUZLU", "41.036721597", "28.8706340581", 3),
    (50, "MENDERES", "41.0427591002", "28.8784878297", 4),
    (51, "ESENLER", "41.037682433", "28.8884222852", 5),
    (211, "OTOGAR", "41.0401441651", "28.8945600984", 11),
    (204, "KOCATEPE", "41.0484928183", "28.8953862076", 12),
    (205, "SAGMALCILAR", "41.0408544497", "28.9072352877", 13),
    (206, "BAYRAMPASA", "41.0340978572", "28.920238689", 14),
    (207, "ULUBATLI", "41.0240250582", "28.9305034257", 15),
    (208, "EMNIYET", "41.0176115439", "28.9395963977", 16),
    (209, "AKSARAY", "41.0120281897", "28.9480625565", 17),
    (20, "YENIKAPI", "41.0055971704", "28.9513306172", 18),
];

const M1A: &[FallbackStation] = &[
    (105, "ATATURK HAVALIMANI", "40.9795429431", "28.8211244027", 1),
    (106, "DTM - ISTANBUL FUAR MERKEZI", "40.9866455145", "28.8285503243", 2),
    (107, "YENIBOSNA", "40.9893149835", "28.8367043004", 3),
    (108, "ATAKOY", "40.9913500997", "28.846082309", 4),
    (109, "BAHCELIEVLER", "40.9953532384", "28.8630661969", 5),
    (110, "BAKIRKOY - INCIRLI", "40.9966121333", "28.8753997556", 6),
    (60, "ZEYTINBURNU", "41.0014853458", "28.8902920022", 7),
    (112, "MERTER", "41.0076458753", "28.8961771147", 8),
    (113, "DAVUTPASA", "41.0206387059", "28.9001417888", 9),
    (114, "TERAZIDERE", "41.0303317032", "28.8979522419", 10),
    (205, "KOCATEPE", "41.0408544497", "28.9072352877", 12),
];
