diesel::table! {
    billing_infos (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Text,
        street -> Text,
        zipcode -> Text,
        city -> Text,
        country -> Text,
        tax_number -> Nullable<Text>,
        shipping_name -> Nullable<Text>,
        shipping_street -> Nullable<Text>,
        shipping_zipcode -> Nullable<Text>,
        shipping_city -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    invoices (id) {
        id -> Uuid,
        order_id -> Uuid,
        user_id -> Uuid,
        number -> Int4,
        full_number -> Text,
        #[sql_name = "type"]
        type_ -> Text,
        issued -> Date,
        issued_duplicate -> Nullable<Date>,
        selling_date -> Nullable<Date>,
        payment_date -> Date,
        unit_price_net_minor -> Int4,
        quantity -> Int4,
        total_net_minor -> Int4,
        tax_total_minor -> Int4,
        total_minor -> Int4,
        tax_rate_bp -> Nullable<Int4>,
        rebate_minor -> Int4,
        currency -> Text,
        item_description -> Text,
        buyer_name -> Text,
        buyer_street -> Text,
        buyer_zipcode -> Text,
        buyer_city -> Text,
        buyer_country -> Text,
        buyer_tax_number -> Text,
        shipping_name -> Text,
        shipping_street -> Text,
        shipping_zipcode -> Text,
        shipping_city -> Text,
        require_shipment -> Bool,
        issuer_name -> Text,
        issuer_street -> Text,
        issuer_zipcode -> Text,
        issuer_city -> Text,
        issuer_country -> Text,
        issuer_tax_number -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    orders (id) {
        id -> Uuid,
        user_id -> Uuid,
        plan_id -> Uuid,
        pricing_id -> Nullable<Uuid>,
        flat_name -> Nullable<Text>,
        amount_minor -> Int4,
        tax_rate_bp -> Nullable<Int4>,
        currency -> Text,
        status -> Text,
        completed_at -> Nullable<Timestamptz>,
        plan_extended_from -> Nullable<Date>,
        plan_extended_until -> Nullable<Date>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    plan_pricings (id) {
        id -> Uuid,
        plan_id -> Uuid,
        pricing_id -> Uuid,
        price_minor -> Int4,
        regular_price_minor -> Nullable<Int4>,
        has_automatic_renewal -> Bool,
        visible -> Bool,
        position -> Int4,
    }
}

diesel::table! {
    plan_quotas (id) {
        id -> Uuid,
        plan_id -> Uuid,
        quota_id -> Uuid,
        value -> Nullable<Int8>,
    }
}

diesel::table! {
    plans (id) {
        id -> Uuid,
        name -> Text,
        description -> Nullable<Text>,
        available -> Bool,
        visible -> Bool,
        is_default -> Nullable<Bool>,
        position -> Int4,
        url -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    pricings (id) {
        id -> Uuid,
        name -> Text,
        period_days -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    quotas (id) {
        id -> Uuid,
        codename -> Text,
        name -> Text,
        unit -> Nullable<Text>,
        description -> Nullable<Text>,
        is_boolean -> Bool,
        position -> Int4,
        url -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    recurring_user_plans (id) {
        id -> Uuid,
        user_plan_id -> Uuid,
        pricing_id -> Nullable<Uuid>,
        token -> Nullable<Text>,
        payment_provider -> Nullable<Text>,
        amount_minor -> Nullable<Int4>,
        tax_rate_bp -> Nullable<Int4>,
        currency -> Nullable<Text>,
        renewal_triggered_by -> Text,
        token_verified -> Bool,
        card_expire_year -> Nullable<Int4>,
        card_expire_month -> Nullable<Int4>,
        card_masked_number -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    user_plans (id) {
        id -> Uuid,
        user_id -> Uuid,
        plan_id -> Uuid,
        expires_on -> Nullable<Date>,
        active -> Bool,
        branches -> Int4,
        students -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(invoices -> orders (order_id));
diesel::joinable!(orders -> plans (plan_id));
diesel::joinable!(orders -> pricings (pricing_id));
diesel::joinable!(plan_pricings -> plans (plan_id));
diesel::joinable!(plan_pricings -> pricings (pricing_id));
diesel::joinable!(plan_quotas -> plans (plan_id));
diesel::joinable!(plan_quotas -> quotas (quota_id));
diesel::joinable!(recurring_user_plans -> user_plans (user_plan_id));
diesel::joinable!(recurring_user_plans -> pricings (pricing_id));
diesel::joinable!(user_plans -> plans (plan_id));

diesel::allow_tables_to_appear_in_same_query!(
    billing_infos,
    invoices,
    orders,
    plan_pricings,
    plan_quotas,
    plans,
    pricings,
    quotas,
    recurring_user_plans,
    user_plans,
);
