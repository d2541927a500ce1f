//! Diesel table definitions. Keep in sync with `backend/migrations`.

diesel::table! {
    users (id) {
        id -> Int4,
        #[max_length = 50]
        userid -> Nullable<Varchar>,
        #[max_length = 255]
        name -> Varchar,
        #[max_length = 255]
        email -> Varchar,
        #[max_length = 255]
        password -> Varchar,
        #[max_length = 16]
        role -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    guards (id) {
        id -> Int4,
        #[max_length = 50]
        guard_id -> Varchar,
        #[max_length = 255]
        name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    evaluations (id) {
        id -> Int4,
        #[max_length = 100]
        client_id -> Varchar,
        #[max_length = 50]
        guard_id -> Varchar,
        kpi_scores -> Jsonb,
        total_score -> Numeric,
        editable_until -> Timestamptz,
        remarks -> Nullable<Text>,
        #[max_length = 255]
        evaluated_by -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, guards, evaluations);
