//! Classification of catalog names into base creatures and variant forms.
//!
//! The catalog lists regional, mega, battle-stance and similar alternate forms
//! as separate hyphenated entries (`pikachu-gmax`, `raichu-alola`). Those are
//! dropped before enrichment. A handful of base creatures are hyphenated in
//! their own right (`mr-mime`, `ho-oh`) and are kept through an allow-list that
//! takes precedence over the variant markers.

/// Hyphenated names that denote base creatures.
pub const CANONICAL_HYPHENATED: &[&str] = &[
    "nidoran-f",
    "nidoran-m",
    "mr-mime",
    "mime-jr",
    "ho-oh",
    "porygon-z",
    "jangmo-o",
    "hakamo-o",
    "kommo-o",
    "tapu-koko",
    "tapu-lele",
    "tapu-bulu",
    "tapu-fini",
    "type-null",
    "great-tusk",
    "scream-tail",
    "brute-bonnet",
    "flutter-mane",
    "slither-wing",
    "sandy-shocks",
    "iron-treads",
    "iron-bundle",
    "iron-hands",
    "iron-jugulis",
    "iron-moth",
    "iron-thorns",
    "wo-chien",
    "chien-pao",
    "ting-lu",
    "chi-yu",
];

/// Substrings marking an alternate form.
pub const VARIANT_MARKERS: &[&str] = &[
    "mega",
    "alola",
    "galar",
    "hisui",
    "paldea",
    "gmax",
    "totem",
    "primal",
    "origin",
    "therian",
    "zen",
    "speed",
    "attack",
    "defense",
    "sunny",
    "rainy",
    "snowy",
    "fan",
    "frost",
    "heat",
    "mow",
    "wash",
    "blade",
    "small",
    "large",
    "super",
    "school",
    "solo",
    "midnight",
    "dusk",
    "dawn",
    "complete",
    "unbound",
    "pirouette",
    "resolute",
    "crowned",
    "eternamax",
    "low-key",
    "hangry",
    "noice",
    "gulping",
    "gorging",
    "rapid-strike",
    "single-strike",
    "hero",
    "roaming",
    "stretchy",
    "droopy",
    "aqua-breed",
    "blaze-breed",
    "combat-breed",
    "wellspring",
    "hearthflame",
    "cornerstone",
    "stellar",
    "terastal",
    "bloodmoon",
    "three-segment",
    "drive-mode",
    "glide-mode",
    "aquatic-mode",
    "low-power-mode",
    "sprinting-build",
    "swimming-build",
    "gliding-build",
    "limited-build",
];

/// Returns `true` when `raw_name` names a base creature rather than a variant
/// form.
///
/// Hyphenated names matching neither list are treated as canonical; the lists
/// are not exhaustive.
pub fn is_canonical(raw_name: &str) -> bool {
    if !raw_name.contains('-') {
        return true;
    }

    if CANONICAL_HYPHENATED.contains(&raw_name) {
        return true;
    }

    !VARIANT_MARKERS
        .iter()
        .any(|marker| raw_name.contains(marker))
}
