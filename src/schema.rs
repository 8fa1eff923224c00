diesel::table! {
    players (id) {
        id -> Integer,
        name -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    matches (id) {
        id -> Integer,
        winner -> Integer,
        loser -> Integer,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(matches, players,);
