//! Test fixtures for common test scenarios.
//!
//! Existing POM documents in the shapes the merge has to handle.

/// Existing project with its own identity and one property.
pub const IDENTITY_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <groupId>com.test</groupId>
    <artifactId>test-app</artifactId>
    <version>3.0.0</version>
    <name>Test App</name>
    <properties>
        <mainClass>com.test.Main</mainClass>
    </properties>
</project>
"#;

/// Existing project with custom properties and one key the generator also sets.
pub const PROPERTIES_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <properties>
        <custom.property>custom-value</custom.property>
        <another.property>another-value</another.property>
        <maven.compiler.source>8</maven.compiler.source>
    </properties>
</project>
"#;

/// Existing project with a duplicated dependency.
pub const DEPENDENCIES_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>
    <dependencies>
        <dependency>
            <groupId>org.junit.jupiter</groupId>
            <artifactId>junit-jupiter</artifactId>
            <version>5.10.0</version>
            <scope>test</scope>
        </dependency>
        <dependency>
            <groupId>org.slf4j</groupId>
            <artifactId>slf4j-api</artifactId>
            <version>2.0.9</version>
        </dependency>
        <dependency>
            <groupId>org.junit.jupiter</groupId>
            <artifactId>junit-jupiter</artifactId>
            <version>5.10.0</version>
            <scope>test</scope>
        </dependency>
    </dependencies>
</project>
"#;

/// Existing project whose elements carry no namespace.
pub const PLAIN_POM: &str = r#"<project>
    <modelVersion>4.0.0</modelVersion>
    <groupId>com.plain</groupId>
    <properties>
        <plain.property>x</plain.property>
    </properties>
</project>
"#;

/// Not well-formed: the `artifactId` element is never closed.
pub const MALFORMED_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <groupId>com.broken</groupId>
    <artifactId>broken
</project>
"#;
