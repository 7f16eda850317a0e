//! Setup script for the hosted store. The operator runs it once in the
//! store's SQL console; the server only hands it out at `/setup.sql`.

pub const SETUP_SCRIPT: &str = r#"-- fitness_classes: listings submitted through classfinder
CREATE TABLE IF NOT EXISTS fitness_classes (
    id BIGSERIAL PRIMARY KEY,
    class_name TEXT NOT NULL,
    zip_code TEXT NOT NULL,
    instructor TEXT NOT NULL,
    time_slot TEXT NOT NULL,
    description TEXT,
    capacity INTEGER NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_fitness_classes_zip_code ON fitness_classes (zip_code);

ALTER TABLE fitness_classes ENABLE ROW LEVEL SECURITY;

CREATE POLICY "Public read access" ON fitness_classes
    FOR SELECT USING (true);

CREATE POLICY "Public insert access" ON fitness_classes
    FOR INSERT WITH CHECK (true);

CREATE POLICY "Public delete access" ON fitness_classes
    FOR DELETE USING (true);
"#;
