//! Static catalogs: buildings, shop stock, avatar options, badges

use crate::sim::state::AvatarSlot;

/// A building that can be placed on the city grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Building {
    pub id: &'static str,
    pub name: &'static str,
    /// Token stored in the grid cell
    pub asset: &'static str,
    pub cost: u32,
    pub unlocked: bool,
    /// Badges needed before it can be placed
    pub required_badges: u32,
}

const fn building(
    id: &'static str,
    name: &'static str,
    asset: &'static str,
    cost: u32,
    required_badges: u32,
) -> Building {
    Building {
        id,
        name,
        asset,
        cost,
        unlocked: true,
        required_badges,
    }
}

pub const BUILDINGS: &[Building] = &[
    building("house", "House", "/assets/house.jpg", 50, 0),
    building("apartment", "Apartment", "/assets/building.jpeg", 50, 0),
    building("tree", "Tree", "/assets/tree.jpeg", 20, 0),
    building("park", "Park", "/assets/park.png", 100, 0),
    building("road", "Road", "/assets/road.png", 10, 0),
    building("road2", "Road2", "/assets/inv road.png", 10, 0),
    building("school", "School", "/assets/school.jpeg", 200, 5),
    building("hospital", "Hospital", "/assets/hospital.jpeg", 300, 8),
    building("castle", "Castle", "/assets/castle.jpeg", 500, 10),
];

pub fn building_by_id(id: &str) -> Option<&'static Building> {
    BUILDINGS.iter().find(|b| b.id == id)
}

/// What a shop purchase grants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopKind {
    /// Wearable; equipped into the slot on purchase
    Avatar(AvatarSlot),
    /// Decorative landmark kept in the inventory
    Landmark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub cost: u32,
    pub kind: ShopKind,
    pub description: &'static str,
}

const fn wearable(
    slot: AvatarSlot,
    id: &'static str,
    name: &'static str,
    emoji: &'static str,
    cost: u32,
) -> ShopItem {
    ShopItem {
        id,
        name,
        emoji,
        cost,
        kind: ShopKind::Avatar(slot),
        description: "",
    }
}

const fn landmark(
    id: &'static str,
    name: &'static str,
    emoji: &'static str,
    cost: u32,
    description: &'static str,
) -> ShopItem {
    ShopItem {
        id,
        name,
        emoji,
        cost,
        kind: ShopKind::Landmark,
        description,
    }
}

pub const SHOP_ITEMS: &[ShopItem] = &[
    wearable(AvatarSlot::Accessories, "crown", "Golden Crown", "👑", 150),
    wearable(AvatarSlot::Pet, "unicorn", "Unicorn Pet", "🦄", 200),
    wearable(AvatarSlot::Accessories, "cape", "Rainbow Cape", "🌈", 120),
    wearable(AvatarSlot::Accessories, "backpack", "Adventure Pack", "🎒", 80),
    wearable(AvatarSlot::Hair, "boy1", "Boy Avatar", "👦", 50),
    wearable(AvatarSlot::Hair, "girl2", "Girl Avatar 2", "👧🏻", 50),
    wearable(AvatarSlot::Hair, "girl3", "Girl Avatar 3", "👧🏽", 50),
    wearable(AvatarSlot::Hair, "girl4", "Girl Avatar 4", "👧🏿", 50),
    wearable(AvatarSlot::Pet, "cat", "Cat Pet", "🐱", 100),
    wearable(AvatarSlot::Pet, "dog", "Dog Pet", "🐶", 100),
    wearable(AvatarSlot::Pet, "dragon", "Dragon Pet", "🐲", 250),
    wearable(AvatarSlot::Accessories, "glasses", "Cool Glasses", "🕶️", 60),
    landmark("fountain", "Magic Fountain", "⛲", 150, "Beautiful fountain for your city center"),
    landmark("windmill", "Windmill", "🏭", 180, "Generate energy for your city"),
    landmark("bridge", "Golden Bridge", "🌉", 220, "Connect different parts of your city"),
    landmark("lighthouse", "Lighthouse", "🗼", 300, "Guide ships to your harbor"),
    landmark("ferriswheel", "Ferris Wheel", "🎡", 400, "Fun attraction for your city"),
    landmark("rocket", "Space Rocket", "🚀", 500, "Launch pad for space adventures"),
];

pub fn shop_item_by_id(id: &str) -> Option<&'static ShopItem> {
    SHOP_ITEMS.iter().find(|i| i.id == id)
}

/// One choice in the avatar customizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvatarOption {
    pub id: &'static str,
    pub slot: AvatarSlot,
    pub emoji: &'static str,
    pub name: &'static str,
    /// 0 = free, otherwise must be in the inventory
    pub cost: u32,
}

const fn option(
    slot: AvatarSlot,
    id: &'static str,
    emoji: &'static str,
    name: &'static str,
    cost: u32,
) -> AvatarOption {
    AvatarOption {
        id,
        slot,
        emoji,
        name,
        cost,
    }
}

pub const AVATAR_OPTIONS: &[AvatarOption] = &[
    option(AvatarSlot::Hair, "girl1", "👧", "Girl 1", 0),
    option(AvatarSlot::Hair, "girl2", "👧🏻", "Girl 2", 50),
    option(AvatarSlot::Hair, "girl3", "👧🏽", "Girl 3", 50),
    option(AvatarSlot::Hair, "girl4", "👧🏿", "Girl 4", 50),
    option(AvatarSlot::Hair, "boy1", "👦", "Boy 1", 50),
    option(AvatarSlot::Hair, "boy2", "👦🏻", "Boy 2", 50),
    option(AvatarSlot::Hair, "boy3", "👦🏽", "Boy 3", 50),
    option(AvatarSlot::Hair, "boy4", "👦🏿", "Boy 4", 50),
    option(AvatarSlot::Accessories, "none", "", "None", 0),
    option(AvatarSlot::Accessories, "crown", "👑", "Crown", 150),
    option(AvatarSlot::Accessories, "cape", "🌈", "Cape", 120),
    option(AvatarSlot::Accessories, "backpack", "🎒", "Backpack", 80),
    option(AvatarSlot::Accessories, "glasses", "🕶️", "Glasses", 60),
    option(AvatarSlot::Accessories, "hat", "🎩", "Top Hat", 100),
    option(AvatarSlot::Accessories, "bow", "🎀", "Bow", 40),
    option(AvatarSlot::Accessories, "scarf", "🧣", "Scarf", 70),
    option(AvatarSlot::Pet, "bunny", "🐰", "Bunny", 0),
    option(AvatarSlot::Pet, "cat", "🐱", "Cat", 100),
    option(AvatarSlot::Pet, "dog", "🐶", "Dog", 100),
    option(AvatarSlot::Pet, "unicorn", "🦄", "Unicorn", 200),
    option(AvatarSlot::Pet, "dragon", "🐲", "Dragon", 250),
    option(AvatarSlot::Pet, "owl", "🦉", "Owl", 120),
    option(AvatarSlot::Pet, "fox", "🦊", "Fox", 130),
    option(AvatarSlot::Pet, "panda", "🐼", "Panda", 180),
];

pub fn avatar_option_by_id(id: &str) -> Option<&'static AvatarOption> {
    AVATAR_OPTIONS.iter().find(|o| o.id == id)
}

pub fn avatar_options_for(slot: AvatarSlot) -> impl Iterator<Item = &'static AvatarOption> {
    AVATAR_OPTIONS.iter().filter(move |o| o.slot == slot)
}

/// Which threshold a badge watches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeRule {
    MathCorrect(u32),
    LanguageCorrect(u32),
    AnyBuilding,
    GamesPlayed(u32),
    LoginStreak(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub rule: BadgeRule,
}

pub const BADGES: &[BadgeDef] = &[
    BadgeDef {
        id: "math-star",
        name: "Math Star",
        emoji: "🌟",
        description: "Solved 20 math problems",
        rule: BadgeRule::MathCorrect(20),
    },
    BadgeDef {
        id: "spelling-bee",
        name: "Spelling Bee",
        emoji: "📚",
        description: "Perfect spelling streak",
        rule: BadgeRule::LanguageCorrect(15),
    },
    BadgeDef {
        id: "city-builder",
        name: "City Builder",
        emoji: "🏙️",
        description: "Placed your first building",
        rule: BadgeRule::AnyBuilding,
    },
    BadgeDef {
        id: "puzzle-master",
        name: "Puzzle Master",
        emoji: "🧩",
        description: "Completed 10 puzzles",
        rule: BadgeRule::GamesPlayed(10),
    },
    BadgeDef {
        id: "daily-player",
        name: "Daily Player",
        emoji: "📅",
        description: "7 days in a row!",
        rule: BadgeRule::LoginStreak(7),
    },
];
