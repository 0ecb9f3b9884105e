//! Keyword membership tables behind garment classification and look naming.
//!
//! Every entry here changes recommendation output. Treat edits as behavior
//! changes and bump [`TABLES_VERSION`] with them.

use super::domain::Dimension;

pub const TABLES_VERSION: u32 = 1;

pub(crate) const STATEMENT_DETAILS: &[&str] = &[
    "lace",
    "lace trim",
    "cutout",
    "cutouts",
    "sweetheart neckline",
    "corset",
    "ruching",
    "embroidery",
    "sequin",
    "beading",
    "mesh panel",
    "sheer",
    "keyhole",
    "bow detail",
    "ruffles",
    "peplum",
    "asymmetric",
    "one shoulder",
    "off shoulder",
    "cold shoulder",
    "backless",
    "plunging neckline",
];

pub(crate) const STATEMENT_SLEEVES: &[&str] = &[
    "bell sleeves",
    "puff sleeves",
    "balloon sleeves",
    "flutter sleeves",
    "bishop sleeves",
    "lantern sleeves",
    "ruffle sleeves",
    "cape sleeves",
    "dolman sleeves",
    "kimono sleeves",
    "trumpet sleeves",
];

/// Outerwear that covers whatever is worn underneath.
pub(crate) const CLOSED_OUTERWEAR: &[&str] = &[
    "hoodie",
    "sweatshirt",
    "pullover",
    "pullover sweater",
    "crewneck sweater",
    "crewneck",
    "turtleneck",
    "fleece",
    "anorak",
    "windbreaker",
    "parka",
    "puffer",
    "down jacket",
];

pub(crate) const STATEMENT_OUTERWEAR_ELEMENTS: &[&str] = &[
    "off-shoulder",
    "off shoulder",
    "dropped shoulders",
    "one shoulder",
    "cape",
    "poncho",
    "asymmetric",
    "deconstructed",
    "cropped back",
];

pub(crate) const STATEMENT_TOPS: &[&str] = &[
    "crop top",
    "cropped top",
    "bustier",
    "corset top",
    "bralette",
    "tube top",
    "bandeau",
    "halter top",
    "cami",
    "camisole",
];

pub(crate) const ATHLEISURE_BOTTOMS: &[&str] = &[
    "sweatpants",
    "joggers",
    "track pants",
    "athletic shorts",
    "gym shorts",
    "running shorts",
];

pub(crate) const FEMININE_DRESSY_AESTHETICS: &[&str] = &[
    "coquette",
    "romantic",
    "feminine",
    "elegant",
    "dressy",
    "glamorous",
    "chic",
    "sophisticated",
    "dainty",
    "delicate",
];

pub(crate) const STREETWEAR_AESTHETICS: &[&str] = &[
    "streetwear",
    "athleisure",
    "sporty",
    "athletic",
    "hypebeast",
    "urban",
    "y2k",
];

pub(crate) const KNITWEAR: &[&str] = &[
    "sweater",
    "jumper",
    "cardigan",
    "knit",
    "pullover sweater",
    "crewneck sweater",
    "turtleneck",
    "mock neck",
    "v-neck sweater",
];

/// Material words that make any garment knitwear.
pub(crate) const KNIT_MATERIALS: &[&str] = &["knit", "wool", "cashmere"];

pub(crate) const ATHLETIC_TOPS: &[&str] = &[
    "compression",
    "compression shirt",
    "compression top",
    "gym shirt",
    "gym top",
    "training top",
    "workout top",
    "tank top",
    "muscle tee",
    "performance top",
    "athletic top",
    "sports bra",
    "running top",
    "dri-fit",
    "dry fit",
];

/// Aesthetic tags that mark any top as athletic.
pub(crate) const ATHLETIC_AESTHETICS: &[&str] = &["gym", "fitness"];

pub(crate) const FASHION_BOTTOMS: &[&str] = &[
    "jeans",
    "skinny jeans",
    "slim jeans",
    "straight jeans",
    "denim",
    "chinos",
    "trousers",
    "dress pants",
    "slacks",
    "cargo pants",
    "cargo",
    "wide leg jeans",
    "bootcut",
];

/// Checked before [`WEARABLE_ACCESSORIES`]; a match here always wins.
pub(crate) const UNWEARABLE_ACCESSORIES: &[&str] = &[
    "phone case",
    "airpod case",
    "airpods case",
    "tablet case",
    "iphone case",
    "laptop case",
    "laptop sleeve",
    "earbud case",
    "headphone case",
    "rolling paper",
    "lighter",
    "ashtray",
    "grinder",
    "pipe",
    "sticker",
    "poster",
    "figurine",
    "toy",
    "collectible",
    "plush",
    "action figure",
    "model",
    "statue",
    "doll",
    "candle",
    "incense",
    "home decor",
    "decoration",
    "vase",
    "pillow",
    "blanket",
    "towel",
    "rug",
    "mat",
    "water bottle",
    "tumbler",
    "mug",
    "cup",
    "flask",
    "thermos",
    "notebook",
    "pen",
    "pencil",
    "mousepad",
    "coaster",
    "keychain",
    "key chain",
    "lanyard",
    "carabiner",
    "perfume",
    "fragrance",
    "cologne",
    "eau de toilette",
    "eau de parfum",
    "body spray",
    "aftershave",
];

pub(crate) const WEARABLE_ACCESSORIES: &[&str] = &[
    "bracelet",
    "necklace",
    "chain",
    "pendant",
    "ring",
    "earring",
    "earrings",
    "anklet",
    "body chain",
    "brooch",
    "pin",
    "lapel pin",
    "cufflink",
    "cufflinks",
    "watch",
    "smartwatch",
    "timepiece",
    "hat",
    "cap",
    "beanie",
    "bucket hat",
    "snapback",
    "fitted cap",
    "visor",
    "beret",
    "fedora",
    "baseball cap",
    "dad hat",
    "trucker hat",
    "sunglasses",
    "glasses",
    "eyewear",
    "shades",
    "bag",
    "backpack",
    "duffle",
    "duffel",
    "tote",
    "messenger bag",
    "crossbody",
    "shoulder bag",
    "sling bag",
    "fanny pack",
    "belt bag",
    "clutch",
    "purse",
    "handbag",
    "satchel",
    "briefcase",
    "scarf",
    "bandana",
    "headband",
    "hair accessory",
    "scrunchie",
    "neck warmer",
    "balaclava",
    "mask",
    "belt",
    "suspenders",
    "waist chain",
    "gloves",
    "mittens",
    "tie",
    "bow tie",
    "pocket square",
    "wallet",
    "card holder",
    "card case",
    "money clip",
];

/// Display name and description per (dimension, value).
pub(crate) const LOOK_NAMES: &[(&str, &[(&str, &str, &str)])] = &[
    (
        "occasion",
        &[
            ("casual", "Casual Day Out", "Relaxed everyday style"),
            ("everyday", "Everyday Essential", "Versatile daily wear"),
            ("athletic", "Active Lifestyle", "Ready for movement"),
            ("smart casual", "Elevated Casual", "Polished yet relaxed"),
            ("work", "Office Ready", "Professional and sharp"),
            ("gym", "Gym Session", "Performance focused"),
            ("date", "Date Night", "Impress with style"),
            ("party", "Party Ready", "Stand out from the crowd"),
            ("weekend", "Weekend Vibes", "Effortless weekend style"),
            ("travel", "Travel Ready", "Comfort meets style"),
        ],
    ),
    (
        "aesthetic",
        &[
            ("streetwear", "Street Style", "Urban edge meets comfort"),
            ("minimalist", "Clean Minimal", "Less is more"),
            ("athletic", "Sport Luxe", "Athletic meets fashion"),
            ("hypebeast", "Hype Drop", "Statement streetwear"),
            ("classic", "Timeless Classic", "Enduring elegance"),
            ("techwear", "Tech Forward", "Functional futurism"),
            ("y2k", "Y2K Revival", "Early 2000s nostalgia"),
            ("vintage", "Retro Vibes", "Throwback style"),
            ("preppy", "Preppy Chic", "Clean cut sophistication"),
            ("luxury", "Luxury Edit", "Premium selections"),
            ("urban", "Urban Edge", "City-ready style"),
            ("sporty", "Sporty Casual", "Athletic inspired comfort"),
        ],
    ),
    (
        "color",
        &[
            ("monochrome", "Monochrome Flow", "Single color harmony"),
            ("neutral", "Neutral Palette", "Understated tones"),
            ("accent", "Pop of Color", "Bold color accent"),
            ("earth", "Earth Tones", "Natural color palette"),
            ("dark", "Dark Mode", "Deep sophisticated tones"),
            ("light", "Light & Bright", "Fresh airy palette"),
        ],
    ),
    (
        "style",
        &[
            ("relaxed", "Relaxed Fit", "Comfortable and easy"),
            ("fitted", "Sharp Silhouette", "Clean fitted lines"),
            ("layered", "Layered Look", "Dimension through layers"),
            ("statement", "Statement Piece", "Bold focal point"),
        ],
    ),
];

/// Fallback looks tried in order once the clusters run out:
/// (dimension, value, name, description).
pub(crate) const EXTENDED_LOOKS: &[(Dimension, &str, &str, &str)] = &[
    (Dimension::Style, "relaxed", "Relaxed Fit", "Comfortable and easy"),
    (Dimension::Style, "fitted", "Sharp Silhouette", "Clean fitted lines"),
    (Dimension::Style, "layered", "Layered Look", "Dimension through layers"),
    (Dimension::Style, "statement", "Statement Piece", "Bold focal point"),
    (Dimension::Color, "earth", "Earth Tones", "Natural color palette"),
    (Dimension::Color, "dark", "Dark Mode", "Deep sophisticated tones"),
    (Dimension::Aesthetic, "urban", "Urban Edge", "City-ready style"),
    (Dimension::Aesthetic, "sporty", "Sporty Casual", "Athletic inspired comfort"),
    (Dimension::Occasion, "weekend", "Weekend Vibes", "Effortless weekend style"),
    (Dimension::Occasion, "travel", "Travel Ready", "Comfort meets style"),
];

/// True when any keyword occurs as a substring of `text`.
pub(crate) fn mentions(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// True when any tag equals one of the keywords.
pub(crate) fn tagged(tags: &[String], keywords: &[&str]) -> bool {
    tags.iter()
        .any(|tag| keywords.contains(&tag.to_lowercase().as_str()))
}
