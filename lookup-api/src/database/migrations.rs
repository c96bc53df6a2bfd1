use rusqlite::Connection;

/// Run all database migrations
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    // Create contacts table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name VARCHAR,
            middle_name VARCHAR,
            last_name VARCHAR,
            company_name VARCHAR,
            full_name VARCHAR NOT NULL DEFAULT '',
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_contacts_full_name ON contacts(full_name)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_contacts_company_name ON contacts(company_name)",
        [],
    )?;

    // Create contact_emails table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS contact_emails (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            contact_id INTEGER NOT NULL,
            email_id VARCHAR,
            is_primary BOOLEAN NOT NULL DEFAULT false,
            idx INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (contact_id) REFERENCES contacts (id) ON DELETE CASCADE
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_contact_emails_contact ON contact_emails(contact_id)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_contact_emails_email ON contact_emails(email_id)",
        [],
    )?;

    // Create dynamic_links table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS dynamic_links (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            contact_id INTEGER NOT NULL,
            link_doctype VARCHAR NOT NULL,
            link_name VARCHAR NOT NULL,
            idx INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (contact_id) REFERENCES contacts (id) ON DELETE CASCADE
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_dynamic_links_contact ON dynamic_links(contact_id)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_dynamic_links_link ON dynamic_links(link_doctype, link_name)",
        [],
    )?;

    Ok(())
}
