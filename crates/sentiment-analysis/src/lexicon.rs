//! Fixed sentiment lexicons for ad copy. The word lists mix the Dutch
//! market vocabulary the ads are written in with common English marketing
//! terms, since competitor creatives use both.

pub const POSITIVE_WORDS: &[&str] = &[
    // Dutch
    "gratis", "korting", "beste", "aanbieding", "nieuw", "exclusief",
    "voordeel", "winnen", "uniek", "topkwaliteit", "snel", "gemakkelijk",
    "besparen", "favoriet", "populair", "garantie",
    // English
    "free", "discount", "best", "offer", "new", "exclusive", "save",
    "deal", "premium", "quality", "guarantee", "limited", "sale", "win",
    "easy", "proven", "trusted", "popular", "bonus", "upgrade",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    // Dutch
    "duur", "slecht", "probleem", "klacht", "teleurstellend", "traag",
    "verlies", "risico", "mislukt",
    // English
    "expensive", "bad", "problem", "complaint", "worst", "fail", "poor",
    "disappointing", "slow", "loss", "risk", "broken", "scam", "hidden",
    "warning",
];
