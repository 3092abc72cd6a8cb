use the_recap_telemetry::model::Role;

/// The stats role inference looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleSignals {
    pub neutral_minion_kills: u32,
    pub vision_score: u32,
    pub heal_shield_total: u32,
    pub cs_per_min: f64,
    pub damage_share: f64,
    pub game_minutes: f64,
}

/// Guess a role for a player whose payload didn't declare one. Rules are
/// checked in order and the first match wins.
pub fn infer(signals: &RoleSignals) -> Option<Role> {
    let RoleSignals {
        neutral_minion_kills,
        vision_score,
        heal_shield_total,
        cs_per_min,
        damage_share,
        game_minutes,
    } = *signals;

    if neutral_minion_kills >= 50 || (neutral_minion_kills >= 30 && game_minutes >= 20.0) {
        return Some(Role::Jungle);
    }
    if heal_shield_total >= 5000 || (vision_score >= 50 && cs_per_min < 2.0) {
        return Some(Role::Support);
    }
    if cs_per_min >= 7.0 {
        return Some(Role::Bottom);
    }
    if cs_per_min >= 5.0 && damage_share >= 0.25 {
        return Some(Role::Middle);
    }
    if cs_per_min >= 4.0 {
        return Some(Role::Top);
    }
    None
}
